use std::io;

pub trait WriteTo<W: io::Write> {
    type Error;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error>;
}
