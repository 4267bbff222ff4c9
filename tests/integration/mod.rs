//! Integration tests for the fabnet network bootstrapper

mod builder_workflow;
mod cli_surface;
mod commit_workflow;
mod config_documents;
mod supervisor_exec;
