fn main() {
    vgcolour::cli::run();
}
