// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestration only: this layer wires the data, analysis and
// infra layers together but does no parsing, counting or file
// formatting of its own.
//
//   pipeline.rs          — the pure analyze() operation
//   analyze_use_case.rs  — files in → analyze() → files out
//   count_use_case.rs    — one file, one taxonomy, counts out

// The analysis operation exposed to callers
pub mod pipeline;

// Directory-based analysis with exports
pub mod analyze_use_case;

// Single-document keyword counting
pub mod count_use_case;
