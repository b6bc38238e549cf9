//! Justifications (`justificantes` collection).
//!
//! A justification groups students with the classes they missed. Student and
//! class data is embedded as-is; there is no check that a `matricula` exists
//! in the `alumnos` collection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, error::require};

/// One missed class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAbsence {
  #[serde(rename = "id_clase")]
  pub class_id: String,
  #[serde(rename = "fecha")]
  pub date:     NaiveDate,
  /// Start time of the class, e.g. `"08:00"`.
  #[serde(rename = "hora", default, skip_serializing_if = "Option::is_none")]
  pub time:     Option<String>,
}

/// A student covered by a justification, with the classes they missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JustifiedStudent {
  #[serde(rename = "nombre")]
  pub name:       String,
  #[serde(rename = "matricula")]
  pub student_id: String,
  #[serde(rename = "carrera")]
  pub program:    String,
  #[serde(rename = "clases", default)]
  pub classes:    Vec<ClassAbsence>,
}

/// A persisted justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
  #[serde(rename = "_id")]
  pub id:          Uuid,
  #[serde(rename = "nombre")]
  pub name:        String,
  #[serde(rename = "descripcion", default)]
  pub description: String,
  #[serde(rename = "fecha_creacion")]
  pub created_at:  DateTime<Utc>,
  #[serde(rename = "alumnos", default)]
  pub students:    Vec<JustifiedStudent>,
}

impl Justification {
  pub fn has_student(&self, student_id: &str) -> bool {
    self.students.iter().any(|s| s.student_id == student_id)
  }
}

/// Input to [`crate::store::RecordStore::insert_justification`] and
/// [`crate::store::RecordStore::replace_justification`].
///
/// `created_at` is optional: the store fills in the current time on insert,
/// and keeps the stored value on replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJustification {
  #[serde(rename = "nombre")]
  pub name:        String,
  #[serde(rename = "descripcion", default)]
  pub description: String,
  #[serde(rename = "fecha_creacion", default)]
  pub created_at:  Option<DateTime<Utc>>,
  #[serde(rename = "alumnos", default)]
  pub students:    Vec<JustifiedStudent>,
}

impl NewJustification {
  pub fn validate(&self) -> Result<()> {
    require("nombre", &self.name)?;
    for student in &self.students {
      require("alumnos.nombre", &student.name)?;
      require("alumnos.matricula", &student.student_id)?;
      require("alumnos.carrera", &student.program)?;
      for class in &student.classes {
        require("alumnos.clases.id_clase", &class.class_id)?;
      }
    }
    Ok(())
  }

  /// Build the stored document, using `fallback_created_at` when the input
  /// carries no creation time.
  pub fn into_justification(
    self,
    id: Uuid,
    fallback_created_at: DateTime<Utc>,
  ) -> Justification {
    Justification {
      id,
      name: self.name,
      description: self.description,
      created_at: self.created_at.unwrap_or(fallback_created_at),
      students: self.students,
    }
  }
}
