
mod pickle_roundtrip;
mod startup;
mod tcp_client;
mod transport_gate;
