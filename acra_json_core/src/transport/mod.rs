/**
 * Transport layer: how the encoded report reaches the collection endpoint.
 *
 * - `http`: `ureq`-based POST, basic-auth credentials, server reply
 */

pub mod http;

pub use http::{Credentials, ServerReply, Transport};
