//! Random scenario generation for stress testing the engine.
