//! Generation of HTCondor input files and their submission.
pub mod command;
pub mod dag;
pub mod submit;
