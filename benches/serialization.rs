use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_php::{from_str, to_string, PhpValue};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Session {
    id: u32,
    user: User,
    tags: Vec<String>,
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = r#"O:4:"User":4:{s:2:"id";i:123;s:4:"name";s:5:"Alice";s:5:"email";s:17:"alice@example.com";s:6:"active";b:1;}"#;

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();
        let text = to_string(&products).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_nested_struct(c: &mut Criterion) {
    let session = Session {
        id: 42,
        user: User {
            id: 7,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            active: false,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };
    let text = to_string(&session).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&session)))
    });

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<Session>(black_box(&text)))
    });
}

fn benchmark_string_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_strings");

    let ascii = "a plain ascii string of moderate length for the codec";
    let multibyte = "日本語のテキストと🦀絵文字が混ざった文字列です";

    group.bench_function("ascii", |b| b.iter(|| to_string(black_box(&ascii))));
    group.bench_function("multibyte", |b| b.iter(|| to_string(black_box(&multibyte))));

    let ascii_text = to_string(&ascii).unwrap();
    let multibyte_text = to_string(&multibyte).unwrap();

    group.bench_function("deserialize_ascii", |b| {
        b.iter(|| from_str::<String>(black_box(&ascii_text)))
    });
    group.bench_function("deserialize_multibyte", |b| {
        b.iter(|| from_str::<String>(black_box(&multibyte_text)))
    });

    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let numbers: Vec<i64> = (0..100).collect();
    let floats: Vec<f64> = (0..100).map(|i| i as f64 * 1.5).collect();

    group.bench_function("serialize_integers", |b| {
        b.iter(|| to_string(black_box(&numbers)))
    });
    group.bench_function("serialize_floats", |b| {
        b.iter(|| to_string(black_box(&floats)))
    });

    let numbers_text = to_string(&numbers).unwrap();
    let floats_text = to_string(&floats).unwrap();

    group.bench_function("deserialize_integers", |b| {
        b.iter(|| from_str::<Vec<i64>>(black_box(&numbers_text)))
    });
    group.bench_function("deserialize_floats", |b| {
        b.iter(|| from_str::<Vec<f64>>(black_box(&floats_text)))
    });

    group.finish();
}

fn benchmark_value_tree(c: &mut Criterion) {
    let products: Vec<Product> = (0..50)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect();
    let text = to_string(&products).unwrap();

    c.bench_function("parse_value_tree", |b| {
        b.iter(|| PhpValue::from_php_str(black_box(&text)))
    });

    let tree = PhpValue::from_php_str(&text).unwrap();
    c.bench_function("render_value_tree", |b| {
        b.iter(|| black_box(&tree).to_php_string())
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&user)).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_nested_struct,
    benchmark_string_lengths,
    benchmark_primitive_array,
    benchmark_value_tree,
    benchmark_roundtrip
);
criterion_main!(benches);
