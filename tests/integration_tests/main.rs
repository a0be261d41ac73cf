mod helpers;
mod job_orchestrator_test;
