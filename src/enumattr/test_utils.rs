use crate::catalog::EnumTypes;
use crate::error::{EnumError, Result};
use crate::table::{EnumRef, EnumTable, RawCode};
use crate::RawAttributes;
use std::sync::Arc;

/// A model with two raw enumerable columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub sex: Option<RawCode>,
    pub status: Option<RawCode>,
}

impl RawAttributes for Person {
    fn read_raw(&self, attribute: &str) -> Option<RawCode> {
        match attribute {
            "sex" => self.sex,
            "status" => self.status,
            _ => None,
        }
    }

    fn write_raw(&mut self, attribute: &str, value: Option<RawCode>) -> Result<()> {
        match attribute {
            "sex" => self.sex = value,
            "status" => self.status = value,
            _ => {
                return Err(EnumError::Storage {
                    attribute: attribute.to_string(),
                    message: "no such column".into(),
                })
            }
        }
        Ok(())
    }
}

pub fn sex_table() -> EnumRef {
    EnumTable::new("Sex")
        .value(1, "Male")
        .value(2, "Female")
        .into_ref()
}

pub fn status_table() -> EnumRef {
    EnumTable::new("Status")
        .value(1, "Active")
        .value(2, "Suspended")
        .into_ref()
}

/// Catalog knowing `Sex` and `Status`.
pub fn catalog() -> Arc<EnumTypes> {
    let types = EnumTypes::new();
    types.register(sex_table());
    types.register(status_table());
    Arc::new(types)
}
