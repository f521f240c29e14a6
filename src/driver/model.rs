use serde::Serialize;

/// Role stamped on every record this job loads.
pub const DRIVER_ROLE: &str = "MOTORISTA";

/// Row as it comes out of the extract query; either column may be NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDriverRow {
    pub chapa: Option<String>,
    pub nome: Option<String>,
}

impl RawDriverRow {
    pub fn new(chapa: impl Into<String>, nome: impl Into<String>) -> Self {
        RawDriverRow {
            chapa: Some(chapa.into()),
            nome: Some(nome.into()),
        }
    }

    pub fn has_null(&self) -> bool {
        self.chapa.is_none() || self.nome.is_none()
    }
}

/// Driver record in the destination table's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverRecord {
    /// Driver badge number
    pub chapa: String,
    pub nome: String,
    pub cargo: String,
}

impl From<&DriverRecord> for RawDriverRow {
    fn from(record: &DriverRecord) -> Self {
        RawDriverRow::new(record.chapa.clone(), record.nome.clone())
    }
}
