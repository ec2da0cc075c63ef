// A rewrite covers at most a whole word: 32 slots of up to 3 UTF-8 bytes.
#[cfg(feature = "heapless")]
pub type OutBuffer = heapless::String<128>;

#[cfg(not(feature = "heapless"))]
pub type OutBuffer = String;

#[cfg(all(not(feature = "std"), not(feature = "heapless")))]
compile_error!(
    "no_std build requires `heapless` feature (use --no-default-features --features heapless)"
);

#[cfg(feature = "heapless")]
#[inline(always)]
pub fn new_out_buffer() -> OutBuffer {
    OutBuffer::new()
}

#[cfg(not(feature = "heapless"))]
#[inline(always)]
pub fn new_out_buffer() -> OutBuffer {
    String::new()
}
