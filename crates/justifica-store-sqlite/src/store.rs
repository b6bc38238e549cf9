//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use justifica_core::{
  group::Group,
  justification::{Justification, NewJustification},
  store::RecordStore,
  student::Student,
  teacher::Teacher,
};

use crate::{
  Error, Result,
  encode::{
    RawStudent, contains_pattern, decode_doc, decode_docs, encode_doc, encode_dt,
    encode_uuid, fold_name,
  },
  schema::SCHEMA,
};

const STUDENT_COLUMNS: &str = "matricula, nombre, carrera, plan_estudios";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Justifica record store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Run `sql` with a single text parameter and collect the first column of
  /// every row. Used for the document collections.
  async fn query_docs(&self, sql: &'static str, param: Option<String>) -> Result<Vec<String>> {
    let docs = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?,
          None => stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?,
        };
        Ok(rows)
      })
      .await?;
    Ok(docs)
  }

  async fn query_students(&self, sql: String, param: Option<String>) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], RawStudent::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawStudent::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawStudent::into_student).collect())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Students ──────────────────────────────────────────────────────────────

  async fn list_students(&self) -> Result<Vec<Student>> {
    self
      .query_students(
        format!("SELECT {STUDENT_COLUMNS} FROM alumnos ORDER BY rowid"),
        None,
      )
      .await
  }

  async fn get_student<'a>(&'a self, student_id: &'a str) -> Result<Option<Student>> {
    let mut found = self
      .query_students(
        format!("SELECT {STUDENT_COLUMNS} FROM alumnos WHERE matricula = ?1"),
        Some(student_id.to_owned()),
      )
      .await?;
    Ok(found.pop())
  }

  async fn search_students<'a>(&'a self, name: &'a str) -> Result<Vec<Student>> {
    self
      .query_students(
        format!(
          "SELECT {STUDENT_COLUMNS} FROM alumnos
           WHERE nombre_folded LIKE ?1 ESCAPE '\\'
           ORDER BY rowid"
        ),
        Some(contains_pattern(&fold_name(name))),
      )
      .await
  }

  async fn insert_student(&self, student: Student) -> Result<Student> {
    student.validate()?;

    let row = student.clone();
    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO alumnos (matricula, nombre, nombre_folded, carrera, plan_estudios)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            row.student_id,
            row.name,
            fold_name(&row.name),
            row.program,
            row.curriculum_plan,
          ],
        );
        match res {
          Ok(_) => Ok(true),
          Err(e)
            if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(justifica_core::Error::DuplicateStudentId(student.student_id).into());
    }
    Ok(student)
  }

  // ── Teachers ──────────────────────────────────────────────────────────────

  async fn list_teachers(&self) -> Result<Vec<Teacher>> {
    let raws = self
      .query_docs("SELECT doc FROM maestros ORDER BY rowid", None)
      .await?;
    decode_docs(raws)
  }

  async fn get_teacher<'a>(&'a self, teacher_id: &'a str) -> Result<Option<Teacher>> {
    let raws = self
      .query_docs(
        "SELECT doc FROM maestros WHERE id_maestro = ?1 ORDER BY rowid LIMIT 1",
        Some(teacher_id.to_owned()),
      )
      .await?;
    raws.first().map(|s| decode_doc(s)).transpose()
  }

  async fn insert_teacher(&self, teacher: Teacher) -> Result<Teacher> {
    teacher.validate()?;

    let id = teacher.teacher_id.clone();
    let doc = encode_doc(&teacher)?;
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO maestros (id_maestro, doc) VALUES (?1, ?2)",
          rusqlite::params![id, doc],
        )?;
        Ok(())
      })
      .await?;
    Ok(teacher)
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  async fn list_groups(&self) -> Result<Vec<Group>> {
    let raws = self
      .query_docs("SELECT doc FROM grupos ORDER BY rowid", None)
      .await?;
    decode_docs(raws)
  }

  async fn get_group<'a>(&'a self, group_id: &'a str) -> Result<Option<Group>> {
    let raws = self
      .query_docs(
        "SELECT doc FROM grupos WHERE id_grupo = ?1 ORDER BY rowid LIMIT 1",
        Some(group_id.to_owned()),
      )
      .await?;
    raws.first().map(|s| decode_doc(s)).transpose()
  }

  async fn groups_for_student<'a>(&'a self, student_id: &'a str) -> Result<Vec<Group>> {
    let raws = self
      .query_docs(
        "SELECT g.doc FROM grupos g
         WHERE EXISTS (
           SELECT 1 FROM json_each(g.doc, '$.alumnos') a
           WHERE json_extract(a.value, '$.matricula') = ?1
         )
         ORDER BY g.rowid",
        Some(student_id.to_owned()),
      )
      .await?;
    decode_docs(raws)
  }

  async fn insert_group(&self, group: Group) -> Result<Group> {
    group.validate()?;

    let id = group.group_id.clone();
    let doc = encode_doc(&group)?;
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO grupos (id_grupo, doc) VALUES (?1, ?2)",
          rusqlite::params![id, doc],
        )?;
        Ok(())
      })
      .await?;
    Ok(group)
  }

  // ── Justifications ────────────────────────────────────────────────────────

  async fn list_justifications(&self) -> Result<Vec<Justification>> {
    let raws = self
      .query_docs(
        "SELECT doc FROM justificantes ORDER BY fecha_creacion DESC, rowid DESC",
        None,
      )
      .await?;
    decode_docs(raws)
  }

  async fn get_justification(&self, id: Uuid) -> Result<Option<Justification>> {
    let raws = self
      .query_docs(
        "SELECT doc FROM justificantes WHERE id = ?1",
        Some(encode_uuid(id)),
      )
      .await?;
    raws.first().map(|s| decode_doc(s)).transpose()
  }

  async fn justifications_for_student<'a>(
    &'a self,
    student_id: &'a str,
  ) -> Result<Vec<Justification>> {
    let raws = self
      .query_docs(
        "SELECT j.doc FROM justificantes j
         WHERE EXISTS (
           SELECT 1 FROM json_each(j.doc, '$.alumnos') a
           WHERE json_extract(a.value, '$.matricula') = ?1
         )
         ORDER BY j.fecha_creacion DESC, j.rowid DESC",
        Some(student_id.to_owned()),
      )
      .await?;
    decode_docs(raws)
  }

  async fn insert_justification(&self, input: NewJustification) -> Result<Justification> {
    input.validate()?;
    let justification = input.into_justification(Uuid::new_v4(), Utc::now());

    let id_str = encode_uuid(justification.id);
    let at_str = encode_dt(justification.created_at);
    let doc = encode_doc(&justification)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO justificantes (id, fecha_creacion, doc) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, at_str, doc],
        )?;
        Ok(())
      })
      .await?;

    Ok(justification)
  }

  async fn replace_justification(
    &self,
    id: Uuid,
    input: NewJustification,
  ) -> Result<Option<Justification>> {
    input.validate()?;

    let existing = match self.get_justification(id).await? {
      Some(j) => j,
      None => return Ok(None),
    };
    let justification = input.into_justification(id, existing.created_at);

    let id_str = encode_uuid(id);
    let at_str = encode_dt(justification.created_at);
    let doc = encode_doc(&justification)?;

    // The row may have been deleted since the read above.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE justificantes SET fecha_creacion = ?2, doc = ?3 WHERE id = ?1",
          rusqlite::params![id_str, at_str, doc],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(justification))
  }

  async fn delete_justification(&self, id: Uuid) -> Result<Option<Justification>> {
    let id_str = encode_uuid(id);

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "DELETE FROM justificantes WHERE id = ?1 RETURNING doc",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    raw.as_deref().map(decode_doc).transpose()
  }
}
