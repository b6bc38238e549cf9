//! SQL schema for the Justifica SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS alumnos (
    matricula     TEXT NOT NULL UNIQUE,
    nombre        TEXT NOT NULL,
    nombre_folded TEXT NOT NULL,   -- lowercased nombre, for search
    carrera       TEXT NOT NULL,
    plan_estudios TEXT NOT NULL DEFAULT ''
);

-- Teachers, groups and justifications are stored as whole JSON documents.
-- Embedded copies of student data are never reconciled with `alumnos`.
CREATE TABLE IF NOT EXISTS maestros (
    id_maestro TEXT NOT NULL,
    doc        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS grupos (
    id_grupo TEXT NOT NULL,
    doc      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS justificantes (
    id             TEXT PRIMARY KEY,
    fecha_creacion TEXT NOT NULL,   -- fixed-width RFC 3339 UTC; sortable
    doc            TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS maestros_id_idx        ON maestros(id_maestro);
CREATE INDEX IF NOT EXISTS grupos_id_idx          ON grupos(id_grupo);
CREATE INDEX IF NOT EXISTS justificantes_date_idx ON justificantes(fecha_creacion);

PRAGMA user_version = 1;
";
