fn main() {
    permalink::cli::run();
}
