#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        // No round-trip to check (there is no compressor);
        // the property is simply that arbitrary input never panics.
        let _ = tex64_rs::mio0::decode(data);
        let _ = tex64_rs::bitmap::render(data);
    })
}
