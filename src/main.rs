fn main() {
    feastly_api::main();
}
