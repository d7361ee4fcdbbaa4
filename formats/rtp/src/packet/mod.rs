pub mod dump;
mod test;

use std::io;

use byteorder::{BigEndian, ByteOrder};
use tokio_util::bytes::{Bytes, BytesMut};
use utils::{
    bits::{bool_from_bit, get_masked, set_masked},
    traits::{dynamic_sized_packet::DynamicSizedPacket, reader::ReadExactFrom, writer::WriteTo},
};

use crate::{
    errors::{RtpError, RtpResult},
    util::padding::{rtp_get_padded_words, rtp_get_padding_size},
};

pub const RTP_FIXED_HEADER_LEN: usize = 12;
pub const RTP_CSRC_LEN: usize = 4;
pub const RTP_MAX_CSRC_COUNT: usize = 15;
pub const RTP_EXTENSION_HEADER_LEN: usize = 4;

const RTP_VERSION_MASK: u8 = 0b1100_0000;
const RTP_PADDING_MASK: u8 = 0b0010_0000;
const RTP_EXTENSION_MASK: u8 = 0b0001_0000;
const RTP_CSRC_COUNT_MASK: u8 = 0b0000_1111;
const RTP_MARKER_MASK: u8 = 0b1000_0000;
const RTP_PAYLOAD_TYPE_MASK: u8 = 0b0111_1111;

const RTP_MARKER_OFFSET: usize = 1;
const RTP_PAYLOAD_TYPE_OFFSET: usize = 1;
const RTP_SEQUENCE_OFFSET: usize = 2;
const RTP_TIMESTAMP_OFFSET: usize = 4;
const RTP_SSRC_OFFSET: usize = 8;

// @see: RFC 3550 5.1 RTP Fixed Header Fields, 5.3.1 RTP Header Extension
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|X|  CC   |M|      PT     |        sequence number        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            timestamp                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |            synchronization source (SSRC) identifier           |
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// |             contributing source (CSRC) identifiers            |
/// |                               ....                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      defined by profile       |           length              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        header extension                       |
/// |                             ....                              |
///
/// An rtp packet kept as its wire bytes. Every header field is read from and
/// written to the buffer in place, the csrc list, extension and payload regions
/// are located from the header content on each access.
///
/// The buffer always holds at least the fixed header, so the fixed fields are
/// infallible. Accessors for the variable regions check the buffer bounds since
/// setters may leave the header describing more bytes than the buffer has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    buffer: BytesMut,
}

impl RtpPacket {
    /// Header size for `csrc_count` identifiers and an optional extension of `extension_words` 32-bit words.
    pub fn calc_header_len(csrc_count: usize, extension_words: Option<usize>) -> usize {
        RTP_FIXED_HEADER_LEN
            + csrc_count * RTP_CSRC_LEN
            + extension_words.map_or(0, |words| RTP_EXTENSION_HEADER_LEN + words * 4)
    }

    pub fn calc_len(csrc_count: usize, extension_words: Option<usize>, payload_len: usize) -> usize {
        Self::calc_header_len(csrc_count, extension_words) + payload_len
    }

    /// Allocate a zeroed packet of `size` bytes, the caller sizes it for the
    /// csrc list, extension and payload it is going to write.
    pub fn alloc(size: usize) -> RtpResult<Self> {
        if size < RTP_FIXED_HEADER_LEN {
            return Err(RtpError::BufferTooShort {
                required: RTP_FIXED_HEADER_LEN,
                actual: size,
            });
        }
        Ok(Self {
            buffer: BytesMut::zeroed(size),
        })
    }

    pub fn copy_from_bytes(bytes: &[u8]) -> RtpResult<Self> {
        Self::from_bytes_mut(BytesMut::from(bytes))
    }

    /// Take ownership of `buffer` as a packet, rejecting it if the header it
    /// carries does not fit.
    pub fn from_bytes_mut(buffer: BytesMut) -> RtpResult<Self> {
        if buffer.len() < RTP_FIXED_HEADER_LEN {
            tracing::debug!("rtp packet rejected, only {} bytes", buffer.len());
            return Err(RtpError::BufferTooShort {
                required: RTP_FIXED_HEADER_LEN,
                actual: buffer.len(),
            });
        }

        let packet = Self { buffer };
        match packet.header_len() {
            Ok(header_len) => {
                tracing::trace!(
                    "rtp packet accepted, header: {} bytes, payload: {} bytes",
                    header_len,
                    packet.buffer.len() - header_len
                );
                Ok(packet)
            }
            Err(err) => {
                tracing::debug!("rtp packet rejected: {}", err);
                Err(err)
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Reset `dst` and copy the whole packet into it.
    pub fn copy_to_bytes(&self, dst: &mut BytesMut) {
        dst.clear();
        dst.extend_from_slice(&self.buffer);
    }

    fn ensure_len(&self, required: usize) -> RtpResult<()> {
        if self.buffer.len() < required {
            return Err(RtpError::BufferTooShort {
                required,
                actual: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn version(&self) -> u8 {
        get_masked(self.buffer[0], RTP_VERSION_MASK)
    }

    pub fn set_version(&mut self, version: u8) {
        self.buffer[0] = set_masked(self.buffer[0], RTP_VERSION_MASK, version);
    }

    pub fn padding(&self) -> bool {
        bool_from_bit(get_masked(self.buffer[0], RTP_PADDING_MASK))
    }

    pub fn set_padding(&mut self) {
        self.buffer[0] |= RTP_PADDING_MASK;
    }

    pub fn clear_padding(&mut self) {
        self.buffer[0] &= !RTP_PADDING_MASK;
    }

    pub fn extension(&self) -> bool {
        bool_from_bit(get_masked(self.buffer[0], RTP_EXTENSION_MASK))
    }

    pub fn set_extension_bit(&mut self) {
        self.buffer[0] |= RTP_EXTENSION_MASK;
    }

    pub fn clear_extension_bit(&mut self) {
        self.buffer[0] &= !RTP_EXTENSION_MASK;
    }

    pub fn csrc_count(&self) -> u8 {
        get_masked(self.buffer[0], RTP_CSRC_COUNT_MASK)
    }

    /// Only the low 4 bits of `count` are kept.
    pub fn set_csrc_count(&mut self, count: u8) {
        self.buffer[0] = set_masked(self.buffer[0], RTP_CSRC_COUNT_MASK, count);
    }

    pub fn marker(&self) -> bool {
        bool_from_bit(get_masked(self.buffer[RTP_MARKER_OFFSET], RTP_MARKER_MASK))
    }

    pub fn set_marker(&mut self) {
        self.buffer[RTP_MARKER_OFFSET] |= RTP_MARKER_MASK;
    }

    pub fn clear_marker(&mut self) {
        self.buffer[RTP_MARKER_OFFSET] &= !RTP_MARKER_MASK;
    }

    pub fn payload_type(&self) -> u8 {
        get_masked(self.buffer[RTP_PAYLOAD_TYPE_OFFSET], RTP_PAYLOAD_TYPE_MASK)
    }

    /// Only the low 7 bits of `payload_type` are kept, the marker is untouched.
    pub fn set_payload_type(&mut self, payload_type: u8) {
        self.buffer[RTP_PAYLOAD_TYPE_OFFSET] = set_masked(
            self.buffer[RTP_PAYLOAD_TYPE_OFFSET],
            RTP_PAYLOAD_TYPE_MASK,
            payload_type,
        );
    }

    pub fn sequence_number(&self) -> u16 {
        BigEndian::read_u16(&self.buffer[RTP_SEQUENCE_OFFSET..])
    }

    pub fn set_sequence_number(&mut self, sequence_number: u16) {
        BigEndian::write_u16(&mut self.buffer[RTP_SEQUENCE_OFFSET..], sequence_number);
    }

    pub fn timestamp(&self) -> u32 {
        BigEndian::read_u32(&self.buffer[RTP_TIMESTAMP_OFFSET..])
    }

    pub fn set_timestamp(&mut self, timestamp: u32) {
        BigEndian::write_u32(&mut self.buffer[RTP_TIMESTAMP_OFFSET..], timestamp);
    }

    pub fn ssrc(&self) -> u32 {
        BigEndian::read_u32(&self.buffer[RTP_SSRC_OFFSET..])
    }

    pub fn set_ssrc(&mut self, ssrc: u32) {
        BigEndian::write_u32(&mut self.buffer[RTP_SSRC_OFFSET..], ssrc);
    }

    pub fn csrc_list(&self) -> RtpResult<Vec<u32>> {
        let count = self.csrc_count() as usize;
        self.ensure_len(Self::calc_header_len(count, None))?;

        Ok(self.buffer[RTP_FIXED_HEADER_LEN..RTP_FIXED_HEADER_LEN + count * RTP_CSRC_LEN]
            .chunks_exact(RTP_CSRC_LEN)
            .map(BigEndian::read_u32)
            .collect())
    }

    /// Write the csrc count together with the identifiers.
    ///
    /// The extension block and payload are not moved, a caller changing the
    /// number of identifiers rewrites whatever follows them.
    pub fn set_csrc_list(&mut self, csrc_list: &[u32]) -> RtpResult<()> {
        if csrc_list.len() > RTP_MAX_CSRC_COUNT {
            return Err(RtpError::TooManyCsrc(csrc_list.len()));
        }
        self.ensure_len(Self::calc_header_len(csrc_list.len(), None))?;

        self.set_csrc_count(csrc_list.len() as u8);
        for (i, csrc) in csrc_list.iter().enumerate() {
            let offset = RTP_FIXED_HEADER_LEN + i * RTP_CSRC_LEN;
            BigEndian::write_u32(&mut self.buffer[offset..], *csrc);
        }
        Ok(())
    }

    fn extension_offset(&self) -> usize {
        Self::calc_header_len(self.csrc_count() as usize, None)
    }

    /// The length field of the header extension, `None` when the extension bit is clear.
    pub fn extension_words(&self) -> RtpResult<Option<usize>> {
        if !self.extension() {
            return Ok(None);
        }
        let offset = self.extension_offset();
        self.ensure_len(offset + RTP_EXTENSION_HEADER_LEN)?;
        Ok(Some(BigEndian::read_u16(&self.buffer[offset + 2..]) as usize))
    }

    /// The profile defined field, 0 when the extension bit is clear.
    pub fn extension_profile(&self) -> RtpResult<u16> {
        if !self.extension() {
            return Ok(0);
        }
        let offset = self.extension_offset();
        self.ensure_len(offset + 2)?;
        Ok(BigEndian::read_u16(&self.buffer[offset..]))
    }

    /// The extension data including its padding, callers knowing the unpadded
    /// length need to track it themselves.
    pub fn extension_data(&self) -> RtpResult<Option<&[u8]>> {
        let Some(words) = self.extension_words()? else {
            return Ok(None);
        };
        let start = self.extension_offset() + RTP_EXTENSION_HEADER_LEN;
        let end = start + words * 4;
        self.ensure_len(end)?;
        Ok(Some(&self.buffer[start..end]))
    }

    /// Write the extension block right after the csrc list and set the extension bit.
    ///
    /// `data` is zero padded to a multiple of 4 bytes. The packet never grows,
    /// if the block does not fit in the buffer nothing is written.
    pub fn set_extension(&mut self, profile: u16, data: &[u8]) -> RtpResult<()> {
        let offset = self.extension_offset();
        let padding = rtp_get_padding_size(data.len());
        let words = rtp_get_padded_words(data.len());
        let required = offset + RTP_EXTENSION_HEADER_LEN + data.len() + padding;
        if required > self.buffer.len() || words > u16::MAX as usize {
            tracing::debug!(
                "rtp header extension of {} bytes does not fit, {} bytes required, {} available",
                data.len(),
                required,
                self.buffer.len()
            );
            return Err(RtpError::ExtensionOverflow {
                required,
                capacity: self.buffer.len(),
            });
        }

        BigEndian::write_u16(&mut self.buffer[offset..], profile);
        BigEndian::write_u16(&mut self.buffer[offset + 2..], words as u16);
        let data_start = offset + RTP_EXTENSION_HEADER_LEN;
        let data_end = data_start + data.len();
        self.buffer[data_start..data_end].copy_from_slice(data);
        self.buffer[data_end..required].fill(0);
        self.set_extension_bit();
        Ok(())
    }

    /// Header size as described by the header itself, fails if that exceeds the buffer.
    pub fn header_len(&self) -> RtpResult<usize> {
        let header_len = Self::calc_header_len(self.csrc_count() as usize, self.extension_words()?);
        self.ensure_len(header_len)?;
        Ok(header_len)
    }

    pub fn payload_len(&self) -> RtpResult<usize> {
        Ok(self.buffer.len() - self.header_len()?)
    }

    pub fn payload(&self) -> RtpResult<&[u8]> {
        let header_len = self.header_len()?;
        Ok(&self.buffer[header_len..])
    }

    pub fn payload_mut(&mut self) -> RtpResult<&mut [u8]> {
        let header_len = self.header_len()?;
        Ok(&mut self.buffer[header_len..])
    }
}

impl AsRef<[u8]> for RtpPacket {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl TryFrom<&[u8]> for RtpPacket {
    type Error = RtpError;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::copy_from_bytes(value)
    }
}

impl TryFrom<BytesMut> for RtpPacket {
    type Error = RtpError;
    fn try_from(value: BytesMut) -> Result<Self, Self::Error> {
        Self::from_bytes_mut(value)
    }
}

impl DynamicSizedPacket for RtpPacket {
    fn get_packet_bytes_count(&self) -> usize {
        self.buffer.len()
    }
}

impl<R: io::Read> ReadExactFrom<R> for RtpPacket {
    type Error = RtpError;
    fn read_exact_from(length: usize, mut reader: R) -> Result<Self, Self::Error> {
        let mut buffer = BytesMut::zeroed(length);
        reader.read_exact(&mut buffer)?;
        Self::from_bytes_mut(buffer)
    }
}

impl<W: io::Write> WriteTo<W> for RtpPacket {
    type Error = RtpError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        writer.write_all(&self.buffer)?;
        Ok(())
    }
}
