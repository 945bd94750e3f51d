pub mod firebase;

pub use firebase::FirebaseTokenVerifier;
