use std::io;

/// Read an object that occupies exactly `length` bytes of the reader.
pub trait ReadExactFrom<R: io::Read>: Sized {
    type Error;
    fn read_exact_from(length: usize, reader: R) -> Result<Self, Self::Error>;
}
