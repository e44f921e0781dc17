// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Orders, the rules that decide their status and priority, and the
// collaborator traits the processor depends on. No I/O lives here.
//
// ============================================================================

pub mod order;
