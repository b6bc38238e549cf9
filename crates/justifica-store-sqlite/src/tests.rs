//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use justifica_core::{
  group::{Group, RosterEntry, TeacherSummary},
  justification::{ClassAbsence, JustifiedStudent, NewJustification},
  store::{RecordStore, StoreError},
  student::Student,
  teacher::Teacher,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn student(matricula: &str, nombre: &str) -> Student {
  Student {
    name:            nombre.into(),
    student_id:      matricula.into(),
    program:         "Ingeniería en Sistemas".into(),
    curriculum_plan: "2020".into(),
  }
}

fn justification(name: &str, matriculas: &[&str]) -> NewJustification {
  NewJustification {
    name:        name.into(),
    description: "Evento académico".into(),
    created_at:  None,
    students:    matriculas
      .iter()
      .map(|m| JustifiedStudent {
        name:       format!("Alumno {m}"),
        student_id: (*m).into(),
        program:    "CS".into(),
        classes:    vec![ClassAbsence {
          class_id: "MAT101".into(),
          date:     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
          time:     Some("08:00".into()),
        }],
      })
      .collect(),
  }
}

fn at(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_student() {
  let s = store().await;

  s.insert_student(student("A1", "Ana García")).await.unwrap();

  let fetched = s.get_student("A1").await.unwrap().unwrap();
  assert_eq!(fetched, student("A1", "Ana García"));
  assert!(s.get_student("B2").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_matricula_is_rejected() {
  let s = store().await;
  s.insert_student(student("A1", "Ana")).await.unwrap();

  let err = s.insert_student(student("A1", "Otra Ana")).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(justifica_core::Error::DuplicateStudentId(ref id)) if id == "A1"
  ));
  assert!(err.as_core().is_some_and(|e| e.is_bad_request()));

  assert_eq!(s.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_student_is_not_stored() {
  let s = store().await;
  let err = s.insert_student(student("A1", "")).await.unwrap_err();
  assert!(matches!(err, crate::Error::Core(justifica_core::Error::Validation(_))));
  assert!(s.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_students_keeps_insertion_order() {
  let s = store().await;
  s.insert_student(student("C3", "Carlos")).await.unwrap();
  s.insert_student(student("A1", "Ana")).await.unwrap();

  let ids: Vec<_> = s
    .list_students()
    .await
    .unwrap()
    .into_iter()
    .map(|st| st.student_id)
    .collect();
  assert_eq!(ids, ["C3", "A1"]);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
  let s = store().await;
  s.insert_student(student("A1", "Ana García")).await.unwrap();
  s.insert_student(student("B2", "Mariana Ruiz")).await.unwrap();
  s.insert_student(student("C3", "Carlos Pérez")).await.unwrap();

  let hits = s.search_students("ana").await.unwrap();
  assert_eq!(hits.len(), 2);

  let hits = s.search_students("GARCÍA").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].student_id, "A1");
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.insert_student(student("A1", "Ana")).await.unwrap();

  assert!(s.search_students("%").await.unwrap().is_empty());
  assert!(s.search_students("_na").await.unwrap().is_empty());
}

// ─── Teachers & groups ───────────────────────────────────────────────────────

fn group(id: &str, roster: &[&str]) -> Group {
  Group {
    group_id: id.into(),
    teacher:  TeacherSummary {
      teacher_id: "M1".into(),
      name:       "Luis Ortega".into(),
      capacity:   30,
      schedule:   "L-V 08:00".into(),
    },
    subjects: vec!["Cálculo".into()],
    students: roster
      .iter()
      .map(|m| RosterEntry {
        student_id: (*m).into(),
        name:       format!("Alumno {m}"),
        program:    "CS".into(),
      })
      .collect(),
  }
}

#[tokio::test]
async fn teacher_roundtrip() {
  let s = store().await;
  let teacher = Teacher {
    teacher_id: "M1".into(),
    name:       "Luis Ortega".into(),
    group_ids:  vec!["G1".into(), "G2".into()],
  };
  s.insert_teacher(teacher.clone()).await.unwrap();

  assert_eq!(s.get_teacher("M1").await.unwrap(), Some(teacher));
  assert!(s.get_teacher("M2").await.unwrap().is_none());
  assert_eq!(s.list_teachers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn groups_for_student_searches_embedded_roster() {
  let s = store().await;
  s.insert_group(group("G1", &["A1", "B2"])).await.unwrap();
  s.insert_group(group("G2", &["B2"])).await.unwrap();
  s.insert_group(group("G3", &[])).await.unwrap();

  let ids: Vec<_> = s
    .groups_for_student("B2")
    .await
    .unwrap()
    .into_iter()
    .map(|g| g.group_id)
    .collect();
  assert_eq!(ids, ["G1", "G2"]);

  assert_eq!(s.groups_for_student("A1").await.unwrap().len(), 1);
  assert!(s.groups_for_student("Z9").await.unwrap().is_empty());
  assert_eq!(s.get_group("G3").await.unwrap(), Some(group("G3", &[])));
}

// ─── Justifications ──────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_creation_time() {
  let s = store().await;
  let before = Utc::now();

  let j = s
    .insert_justification(justification("Torneo", &["A1"]))
    .await
    .unwrap();

  assert!(j.created_at >= before && j.created_at <= Utc::now());
  assert_eq!(s.get_justification(j.id).await.unwrap(), Some(j));
}

#[tokio::test]
async fn explicit_creation_time_is_kept() {
  let s = store().await;
  let mut input = justification("Torneo", &["A1"]);
  input.created_at = Some(at("2023-09-01T12:00:00Z"));

  let j = s.insert_justification(input).await.unwrap();
  assert_eq!(j.created_at, at("2023-09-01T12:00:00Z"));
}

#[tokio::test]
async fn listing_is_newest_first() {
  let s = store().await;
  let base = at("2024-01-01T00:00:00Z");

  for (name, offset) in [("middle", 5), ("oldest", 0), ("newest", 10)] {
    let mut input = justification(name, &["A1"]);
    input.created_at = Some(base + Duration::days(offset));
    s.insert_justification(input).await.unwrap();
  }
  // No explicit time: now, which is after all of the above.
  s.insert_justification(justification("now", &["B2"]))
    .await
    .unwrap();

  let names: Vec<_> = s
    .list_justifications()
    .await
    .unwrap()
    .into_iter()
    .map(|j| j.name)
    .collect();
  assert_eq!(names, ["now", "newest", "middle", "oldest"]);

  let for_a1: Vec<_> = s
    .justifications_for_student("A1")
    .await
    .unwrap()
    .into_iter()
    .map(|j| j.name)
    .collect();
  assert_eq!(for_a1, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn replace_rewrites_document_and_keeps_creation_time() {
  let s = store().await;
  let original = s
    .insert_justification(justification("Torneo", &["A1"]))
    .await
    .unwrap();

  let updated = s
    .replace_justification(original.id, justification("Torneo regional", &["B2"]))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.id, original.id);
  assert_eq!(updated.created_at, original.created_at);
  assert_eq!(updated.name, "Torneo regional");
  assert!(s.justifications_for_student("A1").await.unwrap().is_empty());
  assert_eq!(s.get_justification(original.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn replace_reruns_validation() {
  let s = store().await;
  let original = s
    .insert_justification(justification("Torneo", &["A1"]))
    .await
    .unwrap();

  let err = s
    .replace_justification(original.id, justification("", &["A1"]))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Core(justifica_core::Error::Validation(_))));
  assert_eq!(s.get_justification(original.id).await.unwrap(), Some(original));
}

#[tokio::test]
async fn replace_missing_returns_none() {
  let s = store().await;
  let result = s
    .replace_justification(Uuid::new_v4(), justification("Torneo", &["A1"]))
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_returns_document_once() {
  let s = store().await;
  let j = s
    .insert_justification(justification("Torneo", &["A1"]))
    .await
    .unwrap();

  assert_eq!(s.delete_justification(j.id).await.unwrap(), Some(j.clone()));
  assert!(s.delete_justification(j.id).await.unwrap().is_none());
  assert!(s.get_justification(j.id).await.unwrap().is_none());
}
