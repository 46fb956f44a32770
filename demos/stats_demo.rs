use chain_hash::HashTable;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of entries to insert.
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    /// Fraction of the inserted entries to erase afterwards.
    #[arg(short = 'e', long = "erase_fraction", default_value_t = 0.9)]
    erase_fraction: f64,
}

fn print_shape(table: &HashTable<u64, u64>) {
    println!(
        "len: {}, capacity: {}, load factor: {:.2}%",
        table.len(),
        table.capacity(),
        table.load_factor() * 100.0
    );
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut table: HashTable<u64, u64> = HashTable::new();
    println!("Initial capacity: {}", table.capacity());

    println!("Inserting {} entries...", args.entries);
    let mut resizes = 0;
    for key in 0..args.entries {
        let before = table.capacity();
        table.insert(key, key * key);
        if table.capacity() != before {
            resizes += 1;
        }
    }
    print_shape(&table);
    println!("Capacity changed {} times while growing", resizes);
    print!("{}", table.stats());

    let to_erase = (args.entries as f64 * args.erase_fraction.clamp(0.0, 1.0)) as u64;
    println!("Erasing {} entries...", to_erase);
    resizes = 0;
    for key in 0..to_erase {
        let before = table.capacity();
        let erased = table.erase(&key);
        assert!(erased, "key {} should have been present", key);
        if table.capacity() != before {
            resizes += 1;
        }
    }
    print_shape(&table);
    println!("Capacity changed {} times while shrinking", resizes);
    print!("{}", table.stats());
}
