use crate::STUB_UUID;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID.as_simple().to_string())
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> UserId {
        UserId(String::from(s))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
