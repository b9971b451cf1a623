//! Sample records loaded into a fresh catalog.

use serde_json::json;

use catalog_model::Book;

pub fn sample_books() -> serde_json::Result<Vec<Book>> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "title": "Le Petit Prince",
            "author": "Antoine de Saint-Exupéry",
            "category": "Fiction",
            "status": "Available",
            "copies": 5,
            "isbn": "9782070612758",
            "pages": 96,
            "publicationDate": "1943-04-06"
        },
        {
            "id": 2,
            "title": "Les Misérables",
            "author": "Victor Hugo",
            "category": "Classic",
            "status": "Borrowed",
            "copies": 3,
            "isbn": "9782253010696",
            "pages": 1463,
            "publicationDate": "1862-01-01"
        },
        {
            "id": 3,
            "title": "L'Étranger",
            "author": "Albert Camus",
            "category": "Philosophical",
            "status": "Available",
            "copies": 4,
            "isbn": "9782070360024",
            "pages": 123,
            "publicationDate": "1942-01-01"
        }
    ]))
}
