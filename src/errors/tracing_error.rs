/// An error that knows how loud it should be in the logs.
///
/// Mistakes made by the player or the operator are warnings; failures of the
/// word store or the terminal are errors.
pub trait TracingError: std::error::Error {
    fn trace(&self);
}
