#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tokio_util::bytes::BytesMut;
    use utils::{
        bytes::writable_to_bytes,
        random::{random_fill, random_u16, random_u32},
        traits::{dynamic_sized_packet::DynamicSizedPacket, reader::ReadExactFrom},
    };

    use crate::{
        errors::RtpError,
        packet::{RTP_FIXED_HEADER_LEN, RtpPacket},
        profiles::avp::payload_types::static_payload_type_name,
    };

    fn garbage_packet(size: usize) -> RtpPacket {
        let mut bytes = vec![0xff; size];
        // no csrc, no extension
        bytes[0] = 0b1110_0000;
        RtpPacket::copy_from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_fixed_fields_round_trip() {
        for mut packet in [RtpPacket::alloc(12).unwrap(), garbage_packet(100)] {
            for version in 0..=3 {
                packet.set_version(version);
                assert_eq!(packet.version(), version);
            }

            for payload_type in 0..=127 {
                packet.set_payload_type(payload_type);
                assert_eq!(packet.payload_type(), payload_type);
            }

            for csrc_count in 0..=15 {
                packet.set_csrc_count(csrc_count);
                assert_eq!(packet.csrc_count(), csrc_count);
            }

            packet.set_padding();
            assert!(packet.padding());
            packet.clear_padding();
            assert!(!packet.padding());

            packet.set_extension_bit();
            assert!(packet.extension());
            packet.clear_extension_bit();
            assert!(!packet.extension());

            packet.set_marker();
            assert!(packet.marker());
            packet.clear_marker();
            assert!(!packet.marker());

            for sequence_number in [0, 1, 0x1234, u16::MAX, random_u16()] {
                packet.set_sequence_number(sequence_number);
                assert_eq!(packet.sequence_number(), sequence_number);
            }

            for timestamp in [0, 1, 0x567890AB, u32::MAX, random_u32()] {
                packet.set_timestamp(timestamp);
                assert_eq!(packet.timestamp(), timestamp);
            }

            for ssrc in [0, 12345678, 0xCDEFFEDC, u32::MAX, random_u32()] {
                packet.set_ssrc(ssrc);
                assert_eq!(packet.ssrc(), ssrc);
            }
        }
    }

    #[test]
    fn test_fields_do_not_overlap() {
        let mut packet = RtpPacket::alloc(12).unwrap();
        packet.set_version(2);
        packet.set_marker();
        packet.set_payload_type(0xFF);
        assert_eq!(packet.payload_type(), 0x7F);
        assert!(packet.marker());

        packet.set_payload_type(0);
        assert!(packet.marker());

        packet.set_csrc_count(0x1F);
        assert_eq!(packet.csrc_count(), 0x0F);
        assert_eq!(packet.version(), 2);
        assert!(!packet.padding());
        assert!(!packet.extension());

        packet.set_version(7);
        assert_eq!(packet.version(), 3);
        assert_eq!(packet.csrc_count(), 0x0F);

        packet.set_csrc_count(0);
        packet.set_padding();
        packet.set_extension_bit();
        assert_eq!(packet.as_bytes()[0], 0b1111_0000);
        assert_eq!(packet.as_bytes()[1], 0b1000_0000);
    }

    #[test]
    fn test_wire_layout() {
        let mut packet = RtpPacket::alloc(16).unwrap();
        packet.set_version(2);
        packet.set_payload_type(0x11);
        packet.set_sequence_number(0x1234);
        packet.set_timestamp(0x567890AB);
        packet.set_ssrc(0xCDEFFEDC);
        packet.payload_mut().unwrap().copy_from_slice(&[0xBA, 0x09, 0x87, 0x65]);

        assert_eq!(
            packet.as_bytes(),
            &[
                0x80, 0x11, 0x12, 0x34, 0x56, 0x78, 0x90, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x09,
                0x87, 0x65
            ]
        );
    }

    #[test]
    fn test_copy_from_bytes() {
        let data: [u8; 17] = [
            0x81, 0x11, 0x12, 0x34, 0x56, 0x78, 0x90, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x09,
            0x87, 0x65, 0x43,
        ];
        let packet = RtpPacket::copy_from_bytes(&data).unwrap();
        assert_eq!(packet.version(), 2);
        assert!(!packet.padding());
        assert!(!packet.extension());
        assert_eq!(packet.csrc_count(), 1);
        assert!(!packet.marker());
        assert_eq!(packet.payload_type(), 0x11);
        assert_eq!(packet.sequence_number(), 0x1234);
        assert_eq!(packet.timestamp(), 0x567890AB);
        assert_eq!(packet.ssrc(), 0xCDEFFEDC);
        assert_eq!(packet.csrc_list().unwrap(), vec![0xBA098765]);
        assert_eq!(packet.header_len().unwrap(), 16);
        assert_eq!(packet.payload().unwrap(), &[0x43]);
        assert_eq!(packet.as_bytes(), &data);

        let packet = RtpPacket::try_from(&data[..]).unwrap();
        assert_eq!(packet.payload_len().unwrap(), 1);
    }

    #[test]
    fn test_reject_malformed() {
        assert!(matches!(
            RtpPacket::alloc(11),
            Err(RtpError::BufferTooShort {
                required: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            RtpPacket::copy_from_bytes(&[0x80; 4]),
            Err(RtpError::BufferTooShort {
                required: 12,
                actual: 4
            })
        ));

        // two csrc identifiers announced, one present
        let mut data = vec![0u8; 16];
        data[0] = 0x82;
        assert!(matches!(
            RtpPacket::copy_from_bytes(&data),
            Err(RtpError::BufferTooShort {
                required: 20,
                actual: 16
            })
        ));

        // extension bit set without room for the extension header
        let mut data = vec![0u8; 14];
        data[0] = 0x90;
        assert!(matches!(
            RtpPacket::copy_from_bytes(&data),
            Err(RtpError::BufferTooShort {
                required: 16,
                actual: 14
            })
        ));

        // extension announces 3 words, only 2 present
        let mut data = vec![0u8; 24];
        data[0] = 0x90;
        data[14..16].copy_from_slice(&[0x00, 0x03]);
        assert!(matches!(
            RtpPacket::from_bytes_mut(BytesMut::from(&data[..])),
            Err(RtpError::BufferTooShort {
                required: 28,
                actual: 24
            })
        ));

        data.extend_from_slice(&[0, 0, 0, 0]);
        let packet = RtpPacket::copy_from_bytes(&data).unwrap();
        assert_eq!(packet.header_len().unwrap(), 28);
        assert_eq!(packet.payload_len().unwrap(), 0);
    }

    #[test]
    fn test_header_len() {
        for csrc_count in [0_usize, 1, 4, 15] {
            for extension_words in [None, Some(0_usize), Some(1), Some(3)] {
                let size = RtpPacket::calc_len(csrc_count, extension_words, 7);
                let mut packet = RtpPacket::alloc(size).unwrap();
                let csrc_list: Vec<u32> = (0..csrc_count as u32).collect();
                packet.set_csrc_list(&csrc_list).unwrap();
                if let Some(words) = extension_words {
                    packet.set_extension(0xBEDE, &vec![0xAA; words * 4]).unwrap();
                }

                let expected = 12
                    + 4 * csrc_count
                    + extension_words.map_or(0, |words| 4 + 4 * words);
                assert_eq!(packet.header_len().unwrap(), expected);
                assert_eq!(
                    RtpPacket::calc_header_len(csrc_count, extension_words),
                    expected
                );
                assert_eq!(packet.payload_len().unwrap(), 7);
                assert_eq!(
                    packet.payload_len().unwrap(),
                    packet.get_packet_bytes_count() - packet.header_len().unwrap()
                );
                assert_eq!(packet.extension_words().unwrap(), extension_words);
            }
        }
    }

    #[test]
    fn test_csrc_list() {
        let mut packet = RtpPacket::alloc(RtpPacket::calc_len(4, None, 0)).unwrap();
        assert_eq!(packet.csrc_list().unwrap(), Vec::<u32>::new());

        packet.set_csrc_list(&[1, 2, 3, 4]).unwrap();
        assert_eq!(packet.csrc_count(), 4);
        assert_eq!(packet.csrc_list().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(&packet.as_bytes()[12..16], &[0, 0, 0, 1]);

        packet.set_csrc_list(&[0xDEADBEEF]).unwrap();
        assert_eq!(packet.csrc_count(), 1);
        assert_eq!(packet.csrc_list().unwrap(), vec![0xDEADBEEF]);

        let before = packet.clone();
        assert!(matches!(
            packet.set_csrc_list(&[0; 16]),
            Err(RtpError::TooManyCsrc(16))
        ));
        assert!(matches!(
            packet.set_csrc_list(&[7; 5]),
            Err(RtpError::BufferTooShort {
                required: 32,
                actual: 28
            })
        ));
        assert_eq!(packet, before);

        let mut packet = RtpPacket::alloc(RtpPacket::calc_len(15, None, 0)).unwrap();
        let csrc_list: Vec<u32> = (100..115).collect();
        packet.set_csrc_list(&csrc_list).unwrap();
        assert_eq!(packet.csrc_count(), 15);
        assert_eq!(packet.csrc_list().unwrap(), csrc_list);
    }

    #[test]
    fn test_extension_padding() {
        for (length, stored) in [(5, 8), (6, 8), (7, 8), (8, 8), (1, 4), (4, 4), (0, 0)] {
            let data: Vec<u8> = (1..=length as u8).collect();
            let mut packet = garbage_packet(RtpPacket::calc_len(4, Some(2), 10));
            packet.set_csrc_list(&[1, 2, 3, 4]).unwrap();
            packet.set_extension(5678, &data).unwrap();

            assert!(packet.extension());
            assert_eq!(packet.extension_profile().unwrap(), 5678);
            assert_eq!(packet.extension_words().unwrap(), Some(stored / 4));

            let extension = packet.extension_data().unwrap().unwrap();
            assert_eq!(extension.len(), stored, "data length {}", length);
            assert_eq!(&extension[..length], &data[..]);
            assert!(extension[length..].iter().all(|b| *b == 0));

            assert_eq!(packet.csrc_list().unwrap(), vec![1, 2, 3, 4]);
            assert_eq!(
                packet.header_len().unwrap(),
                RtpPacket::calc_header_len(4, Some(stored / 4))
            );
        }
    }

    #[test]
    fn test_extension_overflow() {
        let size = RtpPacket::calc_len(0, Some(1), 0);
        let mut packet = garbage_packet(size);
        let before = packet.clone();

        assert!(matches!(
            packet.set_extension(1, &[1, 2, 3, 4, 5]),
            Err(RtpError::ExtensionOverflow {
                required: 24,
                capacity: 20
            })
        ));
        assert_eq!(packet, before);

        packet.set_extension(1, &[1, 2, 3, 4]).unwrap();
        assert_eq!(packet.extension_data().unwrap(), Some(&[1_u8, 2, 3, 4][..]));
        assert_eq!(packet.payload_len().unwrap(), 0);

        let mut packet = RtpPacket::alloc(12).unwrap();
        assert!(packet.set_extension(1, &[]).is_err());
        assert!(!packet.extension());
    }

    #[test]
    fn test_extension_absent() {
        let packet = garbage_packet(40);
        assert!(!packet.extension());
        assert_eq!(packet.extension_profile().unwrap(), 0);
        assert_eq!(packet.extension_data().unwrap(), None);
        assert_eq!(packet.extension_words().unwrap(), None);
        assert_eq!(packet.header_len().unwrap(), 12);
        assert_eq!(packet.payload_len().unwrap(), 28);
    }

    #[test]
    fn test_mutated_header_out_of_bounds() {
        let mut packet = RtpPacket::alloc(20).unwrap();
        packet.set_csrc_count(3);
        assert!(matches!(
            packet.csrc_list(),
            Err(RtpError::BufferTooShort {
                required: 24,
                actual: 20
            })
        ));
        assert!(packet.header_len().is_err());
        assert!(packet.payload().is_err());
        assert!(packet.payload_mut().is_err());

        packet.set_csrc_count(2);
        packet.set_extension_bit();
        assert!(packet.extension_profile().is_err());
        assert!(packet.extension_data().is_err());

        let dump = packet.dump().to_string();
        assert!(dump.contains("CSRC:\n[0]: 0x00000000 (0)\n"), "{}", dump);
        assert!(dump.contains("Extension: rtp buffer too short"), "{}", dump);
        assert!(dump.contains("Payload: rtp buffer too short"), "{}", dump);
    }

    #[test]
    fn test_random_buffers() {
        let mut bytes = vec![0u8; 64];
        for _ in 0..1000 {
            random_fill(&mut bytes);
            let size = 12 + (bytes[63] as usize % 52);
            let Ok(packet) = RtpPacket::copy_from_bytes(&bytes[..size]) else {
                continue;
            };
            let header_len = packet.header_len().unwrap();
            assert!(header_len <= size);
            assert_eq!(packet.payload().unwrap().len(), size - header_len);
            assert_eq!(packet.csrc_list().unwrap().len(), packet.csrc_count() as usize);
            assert!(!packet.dump().to_string().is_empty());
        }
    }

    #[test]
    fn test_serialize() {
        let mut packet = RtpPacket::alloc(RtpPacket::calc_len(1, Some(1), 3)).unwrap();
        packet.set_version(2);
        packet.set_sequence_number(7);
        packet.set_csrc_list(&[9]).unwrap();
        packet.set_extension(0x1000, &[0xAB]).unwrap();
        packet.payload_mut().unwrap().copy_from_slice(b"abc");

        let bytes = writable_to_bytes(&packet).unwrap();
        assert_eq!(bytes, packet.as_bytes());
        assert_eq!(bytes.len(), 27);

        let mut dst = BytesMut::from(&b"stale content"[..]);
        packet.copy_to_bytes(&mut dst);
        assert_eq!(&dst[..], packet.as_bytes());

        let mut reader = Cursor::new([bytes.clone(), vec![0xEE; 5]].concat());
        let read = RtpPacket::read_exact_from(bytes.len(), &mut reader).unwrap();
        assert_eq!(read, packet);
        assert_eq!(reader.position(), 27);
        assert_eq!(read.payload().unwrap(), b"abc");

        let mut short_reader = Cursor::new(vec![0x80; 10]);
        assert!(matches!(
            RtpPacket::read_exact_from(12, &mut short_reader),
            Err(RtpError::Io(_))
        ));

        let frozen = packet.freeze();
        assert_eq!(&frozen[..], &bytes[..]);
    }

    #[test]
    fn test_dump_fixed_header_only() {
        let mut packet = RtpPacket::alloc(RTP_FIXED_HEADER_LEN).unwrap();
        packet.set_version(2);
        packet.set_payload_type(96);
        packet.set_sequence_number(1);
        packet.set_timestamp(160);
        packet.set_ssrc(0xCAFE);

        assert_eq!(
            packet.dump().to_string(),
            "10.. .... = version: 2\n\
             ..0. .... = Padding: false\n\
             ...0 .... = Extension: false\n\
             .... 0000 = CSRC count: 0\n\
             0... .... = Marker: false\n\
             Payload type: dynamic (96)\n\
             Sequence number: 1\n\
             Timestamp: 160\n\
             SSRC: 0x0000cafe (51966)\n"
        );
    }

    #[test]
    fn test_packet_print() {
        let size = RtpPacket::calc_len(2, Some(2), 20);
        assert_eq!(size, 52);
        let mut packet = RtpPacket::alloc(size).unwrap();

        packet.set_version(3);
        packet.set_padding();
        packet.set_extension_bit();
        packet.set_marker();
        packet.set_csrc_count(2);
        packet.set_payload_type(8);
        packet.set_sequence_number(1234);
        packet.set_timestamp(5678);
        packet.set_ssrc(12345678);
        packet.set_csrc_list(&[12, 13]).unwrap();
        packet.set_extension(4567, &[1, 2, 3, 4, 5, 6, 7]).unwrap();

        assert_eq!(static_payload_type_name(packet.payload_type()), "PCMA");
        assert_eq!(
            packet.extension_data().unwrap(),
            Some(&[1_u8, 2, 3, 4, 5, 6, 7, 0][..])
        );
        assert_eq!(packet.header_len().unwrap(), 32);
        assert_eq!(packet.payload_len().unwrap(), 20);
        assert_eq!(
            &packet.as_bytes()[..12],
            &[
                0xF2, 0x88, 0x04, 0xD2, 0x00, 0x00, 0x16, 0x2E, 0x00, 0xBC, 0x61, 0x4E
            ]
        );

        let wanted = "11.. .... = version: 3
..1. .... = Padding: true
...1 .... = Extension: true
.... 0010 = CSRC count: 2
1... .... = Marker: true
Payload type: PCMA (8)
Sequence number: 1234
Timestamp: 5678
SSRC: 0x00bc614e (12345678)
CSRC:
[0]: 0x0000000c (12)
[1]: 0x0000000d (13)
Extension:
profile:0x11d7 (4567)
00000000h: 01 02 03 04 05 06 07 00                          ; ........
Payload:
00000000h: 00 00 00 00 00 00 00 00  00 00 00 00 00 00 00 00 ; ................
00000010h: 00 00 00 00                                      ; ....
";
        assert_eq!(packet.dump().to_string(), wanted);

        let mut printed = Vec::new();
        packet.print_to(&mut printed).unwrap();
        assert_eq!(String::from_utf8(printed).unwrap(), wanted);
    }
}
