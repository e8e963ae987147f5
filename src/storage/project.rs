use super::store::KeyValueStore;
use crate::circuit::Circuit;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PROJECTS_KEY: &str = "logicsim_projects";

/// A user-authored circuit with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Time of the last save, stored as an ISO 8601 string with milliseconds
    /// (`2025-01-01T00:00:00.000Z`).
    #[serde(rename = "updatedAt", default, with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub circuit: Circuit,
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// All projects, stored as one JSON array under [`PROJECTS_KEY`].
pub struct ProjectStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProjectStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Project>, StorageError> {
        match self.store.get(PROJECTS_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Project>, StorageError> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Inserts or replaces the project by id, stamping `updated_at`.
    pub fn save(&self, project: &Project) -> Result<Project, StorageError> {
        let mut projects = self.list()?;
        let mut stamped = project.clone();
        stamped.updated_at = Utc::now();

        match projects.iter_mut().find(|p| p.id == stamped.id) {
            Some(existing) => *existing = stamped.clone(),
            None => projects.push(stamped.clone()),
        }
        self.write(&projects)?;
        info!("Saved project '{}' ({})", stamped.name, stamped.id);
        Ok(stamped)
    }

    /// Creates and saves an empty project.
    pub fn create(&self, name: &str, description: &str) -> Result<Project, StorageError> {
        let project = Project {
            id: format!("project_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            description: description.to_string(),
            updated_at: DateTime::default(),
            circuit: Circuit::default(),
        };
        self.save(&project)
    }

    /// Deletes the project if present. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut projects = self.list()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Ok(false);
        }
        self.write(&projects)?;
        Ok(true)
    }

    /// Replaces the circuit of an existing project. Unknown ids are ignored.
    pub fn update_circuit(&self, id: &str, circuit: &Circuit) -> Result<bool, StorageError> {
        match self.get(id)? {
            Some(mut project) => {
                project.circuit = circuit.clone();
                self.save(&project)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn write(&self, projects: &[Project]) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(projects).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(PROJECTS_KEY, &json)
    }
}
