fn main() {
    prettifier::cli::run();
}
