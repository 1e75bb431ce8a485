// cursor_drift — a cursor-reactive motion engine.
//
// Consumes a stream of pointer coordinates and per-item layout bounds and
// emits visual transform values (offset, tilt, spin, scale, glow) for a
// rendering layer to bind. Single-threaded and frame-driven: the host calls
// the update passes once per frame, in order, and everything else follows.

pub mod motion;
