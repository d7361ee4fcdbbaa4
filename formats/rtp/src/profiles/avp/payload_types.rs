use std::fmt;

// @see: RFC 3551 6. Payload Type Definitions

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvpMediaKind {
    Audio,
    Video,
    AudioVideo,
}

impl fmt::Display for AvpMediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvpMediaKind::Audio => write!(f, "A"),
            AvpMediaKind::Video => write!(f, "V"),
            AvpMediaKind::AudioVideo => write!(f, "AV"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvpPayloadTypeInfo {
    pub name: &'static str,
    pub media: AvpMediaKind,
    pub clock_rate: Option<u32>,
    pub channels: Option<u8>,
}

const fn audio(name: &'static str, clock_rate: u32, channels: u8) -> Option<AvpPayloadTypeInfo> {
    Some(AvpPayloadTypeInfo {
        name,
        media: AvpMediaKind::Audio,
        clock_rate: Some(clock_rate),
        channels: Some(channels),
    })
}

const fn video(name: &'static str) -> Option<AvpPayloadTypeInfo> {
    Some(AvpPayloadTypeInfo {
        name,
        media: AvpMediaKind::Video,
        clock_rate: Some(90000),
        channels: None,
    })
}

pub const DYNAMIC_PAYLOAD_TYPE_NAME: &str = "dynamic";
pub const UNKNOWN_PAYLOAD_TYPE_NAME: &str = "unknown";

/// Statically assigned payload types, indexed by payload type number.
/// 1, 2, 19 are reserved, the other gaps are unassigned.
pub static STATIC_PAYLOAD_TYPES: [Option<AvpPayloadTypeInfo>; 95] = {
    let mut table = [None; 95];
    // audio, RFC 3551 table 4
    table[0] = audio("PCMU", 8000, 1);
    table[3] = audio("GSM", 8000, 1);
    table[4] = audio("G723", 8000, 1);
    table[5] = audio("DVI4", 8000, 1);
    table[6] = audio("DVI4", 16000, 1);
    table[7] = audio("LPC", 8000, 1);
    table[8] = audio("PCMA", 8000, 1);
    table[9] = audio("G722", 8000, 1);
    table[10] = audio("L16", 44100, 2);
    table[11] = audio("L16", 44100, 1);
    table[12] = audio("QCELP", 8000, 1);
    table[13] = audio("CN", 8000, 1);
    table[14] = Some(AvpPayloadTypeInfo {
        name: "MPA",
        media: AvpMediaKind::Audio,
        clock_rate: Some(90000),
        channels: None,
    });
    table[15] = audio("G728", 8000, 1);
    table[16] = audio("DVI4", 11025, 1);
    table[17] = audio("DVI4", 22050, 1);
    table[18] = audio("G729", 8000, 1);
    // video, RFC 3551 table 5
    table[25] = video("CelB");
    table[26] = video("JPEG");
    table[28] = video("nv");
    table[31] = video("H261");
    table[32] = video("MPV");
    table[33] = Some(AvpPayloadTypeInfo {
        name: "MP2T",
        media: AvpMediaKind::AudioVideo,
        clock_rate: Some(90000),
        channels: None,
    });
    table[34] = video("H263");
    table
};

pub fn static_payload_type(payload_type: u8) -> Option<&'static AvpPayloadTypeInfo> {
    STATIC_PAYLOAD_TYPES
        .get(payload_type as usize)
        .and_then(|info| info.as_ref())
}

/// Name of a statically assigned payload type.
///
/// Anything past the static table is `"dynamic"`, an empty slot inside it is `"unknown"`.
pub fn static_payload_type_name(payload_type: u8) -> &'static str {
    if (payload_type as usize) >= STATIC_PAYLOAD_TYPES.len() {
        return DYNAMIC_PAYLOAD_TYPE_NAME;
    }
    match &STATIC_PAYLOAD_TYPES[payload_type as usize] {
        Some(info) => info.name,
        None => UNKNOWN_PAYLOAD_TYPE_NAME,
    }
}

/// Find the static payload type registered for an encoding name,
/// the clock rate disambiguates entries like DVI4 or L16.
pub fn find_static_payload_type(encoding_name: &str, clock_rate: Option<u32>) -> Option<u8> {
    STATIC_PAYLOAD_TYPES
        .iter()
        .enumerate()
        .find_map(|(payload_type, info)| {
            let info = info.as_ref()?;
            if !info.name.eq_ignore_ascii_case(encoding_name) {
                return None;
            }
            if clock_rate.is_some() && clock_rate != info.clock_rate {
                return None;
            }
            Some(payload_type as u8)
        })
}
