mod energy_vad_test;
mod tracing_config_test;
