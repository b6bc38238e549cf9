//! Group records (`grupos` collection).
//!
//! A group embeds a snapshot of its teacher and roster instead of referencing
//! the `maestros` and `alumnos` collections; nothing keeps the copies in sync.

use serde::{Deserialize, Serialize};

use crate::{Result, error::require};

/// The teacher information copied into a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSummary {
  #[serde(rename = "id_maestro")]
  pub teacher_id: String,
  #[serde(rename = "nombre")]
  pub name:       String,
  #[serde(rename = "capacidad", default)]
  pub capacity:   u32,
  /// Free-text timetable, e.g. "Lun-Mie 08:00-10:00".
  #[serde(rename = "horario", default)]
  pub schedule:   String,
}

/// One enrolled student as recorded on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
  #[serde(rename = "matricula")]
  pub student_id: String,
  #[serde(rename = "nombre")]
  pub name:       String,
  #[serde(rename = "carrera", default)]
  pub program:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  #[serde(rename = "id_grupo")]
  pub group_id: String,
  #[serde(rename = "maestro")]
  pub teacher:  TeacherSummary,
  #[serde(rename = "materias", default)]
  pub subjects: Vec<String>,
  #[serde(rename = "alumnos", default)]
  pub students: Vec<RosterEntry>,
}

impl Group {
  pub fn validate(&self) -> Result<()> {
    require("id_grupo", &self.group_id)?;
    require("maestro.id_maestro", &self.teacher.teacher_id)?;
    require("maestro.nombre", &self.teacher.name)?;
    for entry in &self.students {
      require("alumnos.matricula", &entry.student_id)?;
      require("alumnos.nombre", &entry.name)?;
    }
    Ok(())
  }

  /// Whether the roster lists `student_id`.
  pub fn has_student(&self, student_id: &str) -> bool {
    self.students.iter().any(|s| s.student_id == student_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn group() -> Group {
    serde_json::from_value(serde_json::json!({
      "id_grupo": "G1",
      "maestro": { "id_maestro": "M1", "nombre": "Luis", "capacidad": 30, "horario": "L-V 8:00" },
      "materias": ["Cálculo"],
      "alumnos": [{ "matricula": "A1", "nombre": "Ana", "carrera": "CS" }]
    }))
    .unwrap()
  }

  #[test]
  fn roster_membership() {
    let g = group();
    g.validate().unwrap();
    assert!(g.has_student("A1"));
    assert!(!g.has_student("A2"));
  }

  #[test]
  fn missing_teacher_name_is_rejected() {
    let mut g = group();
    g.teacher.name.clear();
    assert!(matches!(g.validate(), Err(crate::Error::Validation(m)) if m.contains("maestro.nombre")));
  }
}
