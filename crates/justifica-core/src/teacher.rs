//! Teacher records (`maestros` collection).

use serde::{Deserialize, Serialize};

use crate::{Result, error::require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
  #[serde(rename = "id_maestro")]
  pub teacher_id: String,
  #[serde(rename = "nombre")]
  pub name:       String,
  /// Ids of the groups this teacher leads. Not checked against `grupos`.
  #[serde(rename = "grupos", default)]
  pub group_ids:  Vec<String>,
}

impl Teacher {
  pub fn validate(&self) -> Result<()> {
    require("id_maestro", &self.teacher_id)?;
    require("nombre", &self.name)
  }
}
