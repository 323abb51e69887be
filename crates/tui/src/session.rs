use std::{fs, path::Path};

use api_types::donor::Donor;

use crate::error::Result;

const DEFAULT_SESSION_PATH: &str = "config/session.json";

/// The local session record: the signed-in donor's `{id, name}` under a
/// well-known path. Absence means unauthenticated.
///
/// Writing happens in two places only: the `--donor-id/--donor-name`
/// sign-in override at startup, and [`SessionStore::clear`] when a mid-flow
/// check finds the identity gone.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: String,
}

impl SessionStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Reads the signed-in donor. A missing file or unreadable record is
    /// treated as "not signed in", never as a fatal error.
    pub fn load(&self) -> Result<Option<Donor>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content).ok())
    }

    pub fn save(&self, donor: &Donor) -> Result<()> {
        let parent = Path::new(&self.path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(donor)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// Removes the record; clearing an absent session is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn default_session_path() -> &'static str {
    DEFAULT_SESSION_PATH
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> SessionStore {
        let path = std::env::temp_dir()
            .join(format!("hoperaise_session_{}.json", Uuid::new_v4()));
        SessionStore::new(&path.display().to_string())
    }

    #[test]
    fn missing_file_means_signed_out() {
        let store = temp_store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_load_clear_round_trip() {
        let store = temp_store();
        let donor = Donor {
            id: 7,
            name: "Asha".to_string(),
        };

        store.save(&donor).unwrap();
        assert_eq!(store.load().unwrap(), Some(donor));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing twice stays fine.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_record_means_signed_out() {
        let store = temp_store();
        std::fs::write(&store.path, b"{not json").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
