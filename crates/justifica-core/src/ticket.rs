//! Tickets: the batch of absence entries built by the ticket form.
//!
//! Entries are plain strings because the form never validates what the user
//! types. Validation happens when a ticket is turned into a
//! [`NewJustification`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  error::require,
  justification::{ClassAbsence, JustifiedStudent, NewJustification},
};

/// One absence row of a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEntry {
  #[serde(default)]
  pub nombre:    String,
  #[serde(default)]
  pub matricula: String,
  #[serde(default)]
  pub carrera:   String,
  /// `YYYY-MM-DD`.
  #[serde(default)]
  pub fecha:     String,
  /// `HH:MM`; doubles as the class identifier once converted.
  #[serde(default)]
  pub hora:      String,
}

/// A named batch of absence entries, as submitted by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
  #[serde(rename = "ticketName", default)]
  pub name:    String,
  #[serde(alias = "faltas", default)]
  pub entries: Vec<TicketEntry>,
}

impl Ticket {
  /// Convert the ticket into a justification input.
  ///
  /// Entries are grouped by `matricula` in first-seen order. Each entry
  /// becomes one class absence keyed by its time slot.
  pub fn to_justification(&self) -> Result<NewJustification> {
    let mut students: Vec<JustifiedStudent> = Vec::new();

    for (i, entry) in self.entries.iter().enumerate() {
      require(&format!("entries[{i}].hora"), &entry.hora)?;
      let date = NaiveDate::parse_from_str(entry.fecha.trim(), "%Y-%m-%d")
        .map_err(|_| {
          Error::Validation(format!(
            "`entries[{i}].fecha` must be a YYYY-MM-DD date, got {:?}",
            entry.fecha
          ))
        })?;

      let class = ClassAbsence {
        class_id: entry.hora.trim().to_owned(),
        date,
        time:     Some(entry.hora.trim().to_owned()),
      };

      let matricula = entry.matricula.trim();
      match students.iter_mut().find(|s| s.student_id == matricula) {
        Some(student) => student.classes.push(class),
        None => students.push(JustifiedStudent {
          name:       entry.nombre.trim().to_owned(),
          student_id: matricula.to_owned(),
          program:    entry.carrera.trim().to_owned(),
          classes:    vec![class],
        }),
      }
    }

    let justification = NewJustification {
      name: self.name.trim().to_owned(),
      description: format!("Ticket: {} absence(s)", self.entries.len()),
      created_at: None,
      students,
    };
    justification.validate()?;
    Ok(justification)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(matricula: &str, fecha: &str, hora: &str) -> TicketEntry {
    TicketEntry {
      nombre:    format!("Alumno {matricula}"),
      matricula: matricula.into(),
      carrera:   "CS".into(),
      fecha:     fecha.into(),
      hora:      hora.into(),
    }
  }

  #[test]
  fn groups_entries_by_student_in_first_seen_order() {
    let ticket = Ticket {
      name:    "Semana 3".into(),
      entries: vec![
        entry("B2", "2024-03-01", "08:00"),
        entry("A1", "2024-03-01", "10:00"),
        entry("B2", "2024-03-02", "12:00"),
      ],
    };
    let j = ticket.to_justification().unwrap();
    assert_eq!(j.name, "Semana 3");
    assert!(j.created_at.is_none());
    assert_eq!(j.students.len(), 2);
    assert_eq!(j.students[0].student_id, "B2");
    assert_eq!(j.students[0].classes.len(), 2);
    assert_eq!(j.students[0].classes[1].class_id, "12:00");
    assert_eq!(j.students[1].student_id, "A1");
  }

  #[test]
  fn blank_date_is_a_validation_error() {
    let ticket = Ticket {
      name:    "T".into(),
      entries: vec![entry("A1", "", "08:00")],
    };
    assert!(matches!(ticket.to_justification(), Err(Error::Validation(m)) if m.contains("fecha")));
  }

  #[test]
  fn blank_ticket_name_is_a_validation_error() {
    let ticket = Ticket {
      name:    " ".into(),
      entries: vec![entry("A1", "2024-03-01", "08:00")],
    };
    assert!(matches!(ticket.to_justification(), Err(Error::Validation(_))));
  }

  #[test]
  fn accepts_faltas_alias() {
    let t: Ticket = serde_json::from_str(
      r#"{"ticketName":"T","faltas":[{"nombre":"Ana","matricula":"A1"}]}"#,
    )
    .unwrap();
    assert_eq!(t.entries.len(), 1);
    assert_eq!(t.entries[0].fecha, "");
    let out = serde_json::to_value(&t).unwrap();
    assert!(out.get("entries").is_some());
  }
}
