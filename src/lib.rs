//! Workspace root package. It carries repository tooling (pre-commit hooks)
//! and no code of its own; see the crates under `crates/`.
