use std::fmt;

/// Identifier of a launch, assigned by the reporting service or handed in
/// from outside when several processes report into one launch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LaunchId(String);

impl LaunchId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        LaunchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub name: String,
    pub doc: String,
}
