/*!
Haystacks shared by the benchmarks in `bench.rs`.
*/

pub mod inputs;
