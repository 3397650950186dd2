//! HTTP client for uploading lookup files.
//!
//! This crate provides the [`UploadClient`] that ships a finished CSV
//! lookup file to a repository over the cluster's file-upload endpoint.

mod client;
mod error;

pub use client::{UploadClient, UploadClientBuilder};
pub use error::{Result, UploadError};
