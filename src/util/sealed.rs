/// Prevents downstream crates from implementing marker traits whose set of implementors is
/// closed.
pub trait Sealed {}
