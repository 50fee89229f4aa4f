fn main() {
    spark_lib::run()
}
