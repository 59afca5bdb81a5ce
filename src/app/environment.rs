use crate::app::error::{ListenerError, ListenerResult};
use crate::configuration::constants::env::PARALLEL_RENDEZVOUS;
use crate::reporter::Attachment;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only facts about the run that live outside the listener.
pub trait RunEnvironment {
    /// Shared rendezvous of a multi-process run, `None` for a single process.
    fn parallel_rendezvous(&self) -> Option<String>;

    /// Directory the host runner writes its output (and screenshots) to.
    fn output_dir(&self) -> PathBuf;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Environment of the current process.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
    output_dir: PathBuf,
}

impl ProcessEnvironment {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl RunEnvironment for ProcessEnvironment {
    fn parallel_rendezvous(&self) -> Option<String> {
        std::env::var(PARALLEL_RENDEZVOUS)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone()
    }
}

/// Reads `name` from the output directory as an attachment.
pub fn load_attachment<E: RunEnvironment + ?Sized>(
    environment: &E,
    name: &str,
) -> ListenerResult<Attachment> {
    let path = environment.output_dir().join(name);
    debug!("Attaching {}", path.display());
    let data = environment
        .read_file(&path)
        .map_err(|source| ListenerError::Attachment {
            path: path.clone(),
            source,
        })?;
    Ok(Attachment::guessed(name, data))
}

#[cfg(test)]
pub(crate) mod fixed {
    use super::RunEnvironment;
    use std::path::PathBuf;

    /// Environment with hand-picked answers.
    #[derive(Debug, Clone, Default)]
    pub struct FixedEnvironment {
        pub rendezvous: Option<String>,
        pub output_dir: PathBuf,
    }

    impl RunEnvironment for FixedEnvironment {
        fn parallel_rendezvous(&self) -> Option<String> {
            self.rendezvous.clone()
        }

        fn output_dir(&self) -> PathBuf {
            self.output_dir.clone()
        }
    }
}

#[cfg(test)]
mod test {
    use super::fixed::FixedEnvironment;
    use super::*;

    #[test]
    fn test_loading_screenshot_from_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("selenium-screenshot-1.png"), b"\x89PNG").unwrap();
        let environment = FixedEnvironment {
            output_dir: dir.path().to_path_buf(),
            ..FixedEnvironment::default()
        };

        let attachment = load_attachment(&environment, "selenium-screenshot-1.png").unwrap();
        assert_eq!(attachment.name, "selenium-screenshot-1.png");
        assert_eq!(attachment.data, b"\x89PNG".to_vec());
        assert_eq!(attachment.mime, mime::IMAGE_PNG);
    }

    #[test]
    fn test_missing_screenshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let environment = FixedEnvironment {
            output_dir: dir.path().to_path_buf(),
            ..FixedEnvironment::default()
        };

        match load_attachment(&environment, "selenium-screenshot-9.png") {
            Err(ListenerError::Attachment { path, .. }) => {
                assert!(path.ends_with("selenium-screenshot-9.png"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
