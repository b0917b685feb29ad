use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use netabase_kv::prelude::*;
use tokio::runtime::Runtime;

#[derive(Clone, Debug, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author_id: u64,
}

type ArticleStore = KvStore<RawCodec, BincodeCodec<Article>>;

fn article(i: u64) -> Article {
    Article {
        id: i,
        title: format!("Article {}", i),
        content: format!("Content {}", i),
        author_id: i % 10,
    }
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn temp_store(rt: &Runtime, dir: &tempfile::TempDir) -> ArticleStore {
    let mut store = KvStore::new(
        dir.path().join("articles"),
        Codecs::new(RawCodec, BincodeCodec::new()),
    );
    rt.block_on(store.open_with(OpenOptions::builder().temporary(true).build()))
        .unwrap();
    store
}

fn bench_insert(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("insert");

    for size in [100u64, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("raw_sled", size), size, |b, &size| {
            b.iter(|| {
                let db = sled::Config::new().temporary(true).open().unwrap();
                for i in 0u64..size {
                    let value = bincode::encode_to_vec(&article(i), bincode::config::standard())
                        .unwrap();
                    db.insert(i.to_be_bytes(), value).unwrap();
                }
                black_box(db.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("wrapper", size), size, |b, &size| {
            b.iter(|| {
                let dir = tempfile::tempdir().unwrap();
                let store = temp_store(&rt, &dir);
                rt.block_on(async {
                    for i in 0u64..size {
                        store.put(&i.to_be_bytes().to_vec(), &article(i)).await.unwrap();
                    }
                });
                black_box(&store);
            });
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("get");

    for size in [100u64, 1000].iter() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&rt, &dir);

        rt.block_on(async {
            for i in 0u64..*size {
                let value =
                    bincode::encode_to_vec(&article(i), bincode::config::standard()).unwrap();
                db.insert(i.to_be_bytes(), value).unwrap();
                store.put(&i.to_be_bytes().to_vec(), &article(i)).await.unwrap();
            }
        });

        group.bench_with_input(BenchmarkId::new("raw_sled", size), size, |b, &size| {
            b.iter(|| {
                for i in 0u64..size {
                    black_box(db.get(i.to_be_bytes()).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("wrapper", size), size, |b, &size| {
            b.iter(|| {
                rt.block_on(async {
                    for i in 0u64..size {
                        black_box(store.get(&i.to_be_bytes().to_vec()).await.unwrap());
                    }
                });
            });
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("iteration");

    for size in [100u64, 1000].iter() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&rt, &dir);

        rt.block_on(async {
            for i in 0u64..*size {
                let value =
                    bincode::encode_to_vec(&article(i), bincode::config::standard()).unwrap();
                db.insert(i.to_be_bytes(), value).unwrap();
                store.put(&i.to_be_bytes().to_vec(), &article(i)).await.unwrap();
            }
        });

        group.bench_with_input(BenchmarkId::new("raw_sled", size), size, |b, _size| {
            b.iter(|| black_box(db.iter().count()));
        });

        group.bench_with_input(BenchmarkId::new("wrapper", size), size, |b, _size| {
            b.iter(|| {
                rt.block_on(async {
                    let mut cursor = store.iterator().unwrap();
                    let mut count = 0usize;
                    while cursor.next().await.unwrap().is_some() {
                        count += 1;
                    }
                    cursor.end().await.unwrap();
                    black_box(count);
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_iteration);
criterion_main!(benches);
