
mod constraints;
mod engine;
mod topologies;
