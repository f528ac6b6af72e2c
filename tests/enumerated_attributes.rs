use enumattr::{
    EnumConfig, EnumDefinition, EnumError, EnumLookup, EnumTable, EnumTypes, EnumValue,
    EnumerateOptions, RawAttributes, RawCode, ReadMode, Settings,
};
use std::sync::Arc;

#[derive(Debug, Default)]
struct User {
    sex: Option<RawCode>,
}

impl RawAttributes for User {
    fn read_raw(&self, attribute: &str) -> Option<RawCode> {
        match attribute {
            "sex" => self.sex,
            _ => None,
        }
    }

    fn write_raw(&mut self, attribute: &str, value: Option<RawCode>) -> enumattr::Result<()> {
        match attribute {
            "sex" => {
                self.sex = value;
                Ok(())
            }
            other => Err(EnumError::Storage {
                attribute: other.to_string(),
                message: "no such column".into(),
            }),
        }
    }
}

fn setup(use_name_as_value: bool) -> (EnumDefinition<User>, Arc<Settings>) {
    let types = EnumTypes::new().with(EnumTable::new("Sex").value(1, "Male").value(2, "Female"));
    let settings = Settings::shared(&EnumConfig {
        use_name_as_value,
        ..Default::default()
    });
    let mut users = EnumDefinition::new("User", types.into_shared())
        .with_settings(Arc::clone(&settings));
    users
        .enumerate("sex", EnumerateOptions::default())
        .unwrap();
    (users, settings)
}

#[test]
fn test_sex_scenario_raw_reads() {
    let (users, _) = setup(false);
    let sex = users.attribute("sex").unwrap();
    let mut user = User::default();

    sex.write(&mut user, 1).unwrap();

    assert_eq!(sex.read_default(&user), Some(EnumValue::Id(1)));
    assert_eq!(sex.read(&user, ReadMode::Id), Some(EnumValue::Id(1)));
    assert!(sex.check(&user, Some("male")));
    assert!(!sex.check(&user, Some("female")));
}

#[test]
fn test_sex_scenario_name_reads() {
    let (users, _) = setup(true);
    let sex = users.attribute("sex").unwrap();
    let mut user = User::default();

    sex.write(&mut user, 1).unwrap();

    assert_eq!(sex.read_default(&user), Some(EnumValue::Name("Male".into())));
    assert_eq!(sex.read(&user, ReadMode::Id), Some(EnumValue::Id(1)));
}

#[test]
fn test_flag_flip_changes_default_read_only() {
    let (users, settings) = setup(false);
    let mut user = User::default();
    users.write(&mut user, "sex", 2).unwrap();

    assert_eq!(
        users.read(&user, "sex", ReadMode::Default).unwrap(),
        Some(EnumValue::Id(2))
    );

    settings.set_use_name_as_value(true);
    assert_eq!(
        users.read(&user, "sex", ReadMode::Default).unwrap(),
        Some(EnumValue::Name("Female".into()))
    );
    assert_eq!(user.sex, Some(2));
}

#[test]
fn test_key_round_trip() {
    let (users, _) = setup(false);
    let table = users.enum_for("sex").unwrap();

    for key in ["male", "female"] {
        let mut user = User::default();
        users.write(&mut user, "sex", key).unwrap();
        assert_eq!(
            users.read(&user, "sex", ReadMode::Id).unwrap(),
            table.id_for(key).map(EnumValue::Id)
        );
    }
}

#[test]
fn test_unknown_raw_code_is_stored_but_not_an_id() {
    let (users, _) = setup(false);
    let mut user = User::default();

    users.write(&mut user, "sex", 99).unwrap();

    assert_eq!(user.sex, Some(99));
    assert_eq!(users.read(&user, "sex", ReadMode::Id).unwrap(), None);
    assert_eq!(users.read(&user, "sex", ReadMode::Name).unwrap(), None);
    assert_eq!(
        users.read(&user, "sex", ReadMode::Default).unwrap(),
        Some(EnumValue::Id(99))
    );
}

#[test]
fn test_enum_mode_returns_bound_table() {
    let (users, _) = setup(false);
    let user = User::default();

    let value = users.read(&user, "sex", "enum".into()).unwrap().unwrap();
    let table = value.as_enum().unwrap();
    assert!(Arc::ptr_eq(table, &users.enum_for("sex").unwrap()));
    assert_eq!(table.entries().len(), 2);
}

#[test]
fn test_missing_enum_type_aborts_declaration() {
    let mut users = EnumDefinition::<User>::new("User", EnumTypes::new().into_shared());
    let err = users
        .enumerate("sex", EnumerateOptions::default())
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("sex"));
    assert!(msg.contains("User"));
    assert!(users.enum_for("sex").is_none());
}

#[test]
fn test_redeclare_with_explicit_type() {
    let (mut users, _) = setup(false);
    let gender = EnumTable::new("Gender")
        .entry(10, "male", "Man")
        .entry(20, "female", "Woman")
        .into_ref();

    users
        .enumerate("sex", EnumerateOptions::with(gender))
        .unwrap();

    let mut user = User::default();
    users.write(&mut user, "sex", "female").unwrap();
    assert_eq!(user.sex, Some(20));
    assert_eq!(
        users.read(&user, "sex", ReadMode::Name).unwrap(),
        Some(EnumValue::Name("Woman".into()))
    );
    assert_eq!(users.enum_for("sex").unwrap().type_name(), "Gender");
}

#[test]
fn test_concurrent_reads_after_setup() {
    let (users, _) = setup(false);
    let users = Arc::new(users);

    let handles: Vec<_> = (1..=2)
        .cycle()
        .take(8)
        .map(|code| {
            let users = Arc::clone(&users);
            std::thread::spawn(move || {
                let user = User { sex: Some(code) };
                users.read(&user, "sex", ReadMode::Name).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let name = handle.join().unwrap().unwrap();
        assert!(matches!(name.as_name(), Some("Male") | Some("Female")));
    }
}
