mod mod_batches;
mod mod_fast_path;
mod mod_scenario;
