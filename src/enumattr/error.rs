use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumError {
    #[error(
        "Enum type could not be found for attribute '{attribute}' in {owner}. \
         Specify the enum type explicitly with EnumerateOptions::with."
    )]
    EnumNotFound { attribute: String, owner: String },

    #[error("Catalog error while locating '{type_name}': {message}")]
    Catalog { type_name: String, message: String },

    #[error("Attribute '{attribute}' is not enumerated in {owner}")]
    NotEnumerated { owner: String, attribute: String },

    #[error("Key '{key}' has no entry in {enum_type} (attribute '{attribute}')")]
    UnmappedKey {
        attribute: String,
        key: String,
        enum_type: String,
    },

    #[error("Storage error on '{attribute}': {message}")]
    Storage { attribute: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, EnumError>;
