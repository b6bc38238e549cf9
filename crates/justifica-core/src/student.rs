//! Student records (`alumnos` collection).

use serde::{Deserialize, Serialize};

use crate::{Result, error::require};

/// A student. `matricula` is unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  #[serde(rename = "nombre")]
  pub name:            String,
  #[serde(rename = "matricula")]
  pub student_id:      String,
  #[serde(rename = "carrera")]
  pub program:         String,
  #[serde(rename = "plan_estudios", default)]
  pub curriculum_plan: String,
}

impl Student {
  pub fn validate(&self) -> Result<()> {
    require("nombre", &self.name)?;
    require("matricula", &self.student_id)?;
    require("carrera", &self.program)
  }
}
