//! # Quizbank
//!
//! Backend-to-frontend type synchronisation for the Quizbank quiz API.
//!
//! The backend owns the data shapes (quizzes, questions, options, users,
//! roles, permissions) and the closed string enumerations they use. This
//! workspace turns them into a TypeScript declaration file and keeps that
//! file current while the frontend dev server runs.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── quizbank-core/          # Field<T> (absent / null / present), string enumerations
//! ├── quizbank-config/        # AppMode and environment-driven settings
//! ├── quizbank-models/        # Records, DTOs, enumerations, export registry
//! ├── quizbank-typegen/       # Declarations, validation, TypeScript emission, atomic write
//! ├── quizbank-devsync/       # Watcher orchestrator, build hooks, source watcher
//! ├── quizbank-observability/ # Console logging
//! └── quizbank-cli/           # `quizbank` binary
//! ```
//!
//! ## Flow
//!
//! ```text
//! build session starts (development)
//!     ↓ DevSyncPlugin::on_build_start
//! Orchestrator spawns `quizbank watch`
//!     ↓ source change
//! extraction command rewrites the declaration file
//!     ↓
//! frontend dev server hot-reloads the types
//! ```
//!
//! In production the watcher never starts; `quizbank generate` runs once as
//! part of the build instead.
//!
//! ## Output
//!
//! Shapes are emitted under `App.Data`, enumerations under `App.Enums`:
//!
//! ```text
//! declare namespace App.Data {
//!     export type QuizData = {
//!         id?: number;
//!         time_limit_minutes?: number | null;
//!         author: App.Data.UserData | null;
//!         ...
//!     };
//! }
//! declare namespace App.Enums {
//!     export type QuizStatus = 'draft' | 'published' | 'archived';
//! }
//! ```

pub use quizbank_config as config;
pub use quizbank_devsync as devsync;
pub use quizbank_models as models;
pub use quizbank_typegen as typegen;

pub use quizbank_core::{Field, StringEnum};
