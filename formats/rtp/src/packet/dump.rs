use std::{fmt, io};

use utils::{bits::bool_to_bit, bytes::write_hex_dump};

use crate::profiles::avp::payload_types::static_payload_type_name;

use super::RtpPacket;

/// Annotated text rendering of a packet, one line per header field followed by
/// hex dumps of the extension data and payload.
///
/// Regions the header points past the end of the buffer are rendered as the
/// error instead of their content.
pub struct RtpPacketDump<'a> {
    packet: &'a RtpPacket,
}

impl RtpPacket {
    pub fn dump(&self) -> RtpPacketDump<'_> {
        RtpPacketDump { packet: self }
    }

    pub fn print_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self.dump())
    }
}

impl fmt::Display for RtpPacketDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let packet = self.packet;

        let version = packet.version();
        writeln!(f, "{:02b}.. .... = version: {}", version, version)?;
        let padding = packet.padding();
        writeln!(f, "..{:01b}. .... = Padding: {}", bool_to_bit(padding), padding)?;
        let extension = packet.extension();
        writeln!(f, "...{:01b} .... = Extension: {}", bool_to_bit(extension), extension)?;
        let csrc_count = packet.csrc_count();
        writeln!(f, ".... {:04b} = CSRC count: {}", csrc_count, csrc_count)?;
        let marker = packet.marker();
        writeln!(f, "{:01b}... .... = Marker: {}", bool_to_bit(marker), marker)?;
        let payload_type = packet.payload_type();
        writeln!(
            f,
            "Payload type: {} ({})",
            static_payload_type_name(payload_type),
            payload_type
        )?;
        writeln!(f, "Sequence number: {}", packet.sequence_number())?;
        writeln!(f, "Timestamp: {}", packet.timestamp())?;
        let ssrc = packet.ssrc();
        writeln!(f, "SSRC: 0x{:08x} ({})", ssrc, ssrc)?;

        if csrc_count > 0 {
            match packet.csrc_list() {
                Ok(csrc_list) => {
                    writeln!(f, "CSRC:")?;
                    for (i, csrc) in csrc_list.iter().enumerate() {
                        writeln!(f, "[{}]: 0x{:08x} ({})", i, csrc, csrc)?;
                    }
                }
                Err(err) => writeln!(f, "CSRC: {}", err)?,
            }
        }

        if extension {
            match (packet.extension_profile(), packet.extension_data()) {
                (Ok(profile), Ok(data)) => {
                    writeln!(f, "Extension:")?;
                    writeln!(f, "profile:0x{:04x} ({})", profile, profile)?;
                    write_hex_dump(f, data.unwrap_or_default())?;
                }
                (Err(err), _) | (_, Err(err)) => writeln!(f, "Extension: {}", err)?,
            }
        }

        match packet.payload() {
            Ok([]) => {}
            Ok(payload) => {
                writeln!(f, "Payload:")?;
                write_hex_dump(f, payload)?;
            }
            Err(err) => writeln!(f, "Payload: {}", err)?,
        }

        Ok(())
    }
}
