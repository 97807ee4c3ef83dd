/// Page a comment is attached to. Profile pages use their user's id.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl From<&str> for PageId {
    fn from(s: &str) -> PageId {
        PageId(String::from(s))
    }
}

impl From<crate::UserId> for PageId {
    fn from(u: crate::UserId) -> PageId {
        PageId(u.0)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
