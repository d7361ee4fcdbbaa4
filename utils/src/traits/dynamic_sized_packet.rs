/// Packets whose encoded size depends on their content.
pub trait DynamicSizedPacket {
    fn get_packet_bytes_count(&self) -> usize;
}
