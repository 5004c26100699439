pub mod packet_exchange;
pub mod test_protocol;
