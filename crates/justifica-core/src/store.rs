//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `justifica-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  group::Group,
  justification::{Justification, NewJustification},
  student::Student,
  teacher::Teacher,
};

/// Errors produced by a [`RecordStore`] backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error behind this failure, if it was one. Lets callers tell
  /// a rejected write apart from a broken store.
  fn as_core(&self) -> Option<&crate::Error>;
}

/// Abstraction over the four document collections.
///
/// Every method is a single store operation; there are no cross-collection
/// transactions. Writes validate their input and fail with
/// [`crate::Error::Validation`] (or [`crate::Error::DuplicateStudentId`])
/// wrapped in the backend error.
pub trait RecordStore: Send + Sync {
  type Error: StoreError;

  // ── Students ──────────────────────────────────────────────────────────

  /// All students in insertion order.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Exact match on `matricula`.
  fn get_student<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + 'a;

  /// Case-insensitive substring match on the student's name. `name` is taken
  /// literally; it is not a pattern.
  fn search_students<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + 'a;

  /// Insert a student. Fails if the `matricula` is already taken.
  fn insert_student(
    &self,
    student: Student,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  // ── Teachers ──────────────────────────────────────────────────────────

  fn list_teachers(
    &self,
  ) -> impl Future<Output = Result<Vec<Teacher>, Self::Error>> + Send + '_;

  fn get_teacher<'a>(
    &'a self,
    teacher_id: &'a str,
  ) -> impl Future<Output = Result<Option<Teacher>, Self::Error>> + Send + 'a;

  fn insert_teacher(
    &self,
    teacher: Teacher,
  ) -> impl Future<Output = Result<Teacher, Self::Error>> + Send + '_;

  // ── Groups ────────────────────────────────────────────────────────────

  fn list_groups(
    &self,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + '_;

  fn get_group<'a>(
    &'a self,
    group_id: &'a str,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + 'a;

  /// Groups whose embedded roster lists `student_id`.
  fn groups_for_student<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + 'a;

  fn insert_group(
    &self,
    group: Group,
  ) -> impl Future<Output = Result<Group, Self::Error>> + Send + '_;

  // ── Justifications ────────────────────────────────────────────────────

  /// All justifications, most recently created first.
  fn list_justifications(
    &self,
  ) -> impl Future<Output = Result<Vec<Justification>, Self::Error>> + Send + '_;

  fn get_justification(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Justification>, Self::Error>> + Send + '_;

  /// Justifications listing `student_id`, most recently created first.
  fn justifications_for_student<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Justification>, Self::Error>> + Send + 'a;

  /// Insert a justification with a store-assigned id. The creation time
  /// defaults to now.
  fn insert_justification(
    &self,
    input: NewJustification,
  ) -> impl Future<Output = Result<Justification, Self::Error>> + Send + '_;

  /// Replace the whole document stored under `id`. Returns `None` if there is
  /// no such document. A missing creation time keeps the stored one.
  fn replace_justification(
    &self,
    id: Uuid,
    input: NewJustification,
  ) -> impl Future<Output = Result<Option<Justification>, Self::Error>> + Send + '_;

  /// Remove and return the document stored under `id`, or `None`.
  fn delete_justification(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Justification>, Self::Error>> + Send + '_;
}
