//! Edge case and invariant tests for vitlc-lex.
