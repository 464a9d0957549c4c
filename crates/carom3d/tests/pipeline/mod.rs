mod determinism;
mod tick_events;
