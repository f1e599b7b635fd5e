mod dialects;
mod roundtrip;
