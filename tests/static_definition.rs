//! Models backed by a process-wide definition and the global settings.
//!
//! Kept in its own test binary because it flips `Settings::global()`.

use enumattr::{
    EnumDefinition, EnumTable, EnumTypes, EnumValue, EnumerateOptions, Enumerated, RawAttributes,
    RawCode, ReadMode, Settings,
};
use once_cell::sync::Lazy;

#[derive(Debug, Default)]
struct Account {
    status: Option<RawCode>,
}

impl RawAttributes for Account {
    fn read_raw(&self, _: &str) -> Option<RawCode> {
        self.status
    }

    fn write_raw(&mut self, _: &str, value: Option<RawCode>) -> enumattr::Result<()> {
        self.status = value;
        Ok(())
    }
}

static ACCOUNT_ENUMS: Lazy<EnumDefinition<Account>> = Lazy::new(|| {
    let types = EnumTypes::new().with(
        EnumTable::new("Status")
            .value(1, "Active")
            .value(2, "Closed"),
    );
    let mut accounts = EnumDefinition::for_type(types.into_shared());
    accounts
        .enumerate("statuses", EnumerateOptions::default())
        .expect("Status enum is registered");
    accounts
});

impl Enumerated for Account {
    fn enum_definition() -> &'static EnumDefinition<Self> {
        &ACCOUNT_ENUMS
    }
}

#[test]
fn test_enumerated_model_with_global_settings() {
    assert_eq!(ACCOUNT_ENUMS.owner(), "Account");
    assert!(Account::enum_for("statuses").is_some());

    let mut account = Account::default();
    account.enum_write("statuses", "closed").unwrap();
    assert_eq!(account.status, Some(2));
    assert!(account.enum_check("statuses", Some("closed")).unwrap());
    assert!(account.enum_check("statuses", None).unwrap());

    let global = Settings::global();
    global.set_use_name_as_value(false);
    assert_eq!(
        account.enum_read("statuses", ReadMode::Default).unwrap(),
        Some(EnumValue::Id(2))
    );

    global.set_use_name_as_value(true);
    assert_eq!(
        account.enum_read("statuses", ReadMode::Default).unwrap(),
        Some(EnumValue::Name("Closed".into()))
    );
    global.set_use_name_as_value(false);
}
