mod drag_flow;
mod invariants;
mod persistence;
mod scenarios;
