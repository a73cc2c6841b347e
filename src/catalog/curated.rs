//! Built-in curated module → package table.
//!
//! Popular libraries whose import name is worth listing even when the full
//! index cannot be fetched, including the ones whose distribution name
//! differs from the import name (`sklearn`, `bs4`, `cv2`, `yaml`, ...).
//! Keys are lowercase.

/// Curated entries in display order.
pub const CURATED: &[(&str, &str)] = &[
    // Data science & machine learning
    ("numpy", "numpy"),
    ("pandas", "pandas"),
    ("matplotlib", "matplotlib"),
    ("scipy", "scipy"),
    ("sklearn", "scikit-learn"),
    ("tensorflow", "tensorflow"),
    ("keras", "keras"),
    ("torch", "torch"),
    ("xgboost", "xgboost"),
    ("lightgbm", "lightgbm"),
    ("statsmodels", "statsmodels"),
    ("seaborn", "seaborn"),
    // Web development
    ("flask", "flask"),
    ("django", "django"),
    ("fastapi", "fastapi"),
    ("requests", "requests"),
    ("bs4", "beautifulsoup4"),
    ("aiohttp", "aiohttp"),
    ("urllib3", "urllib3"),
    ("tornado", "tornado"),
    ("bottle", "bottle"),
    ("werkzeug", "werkzeug"),
    // Databases
    ("sqlalchemy", "sqlalchemy"),
    ("pymysql", "pymysql"),
    ("psycopg2", "psycopg2"),
    ("redis", "redis"),
    ("pymongo", "pymongo"),
    // Visualization
    ("plotly", "plotly"),
    ("dash", "dash"),
    ("bokeh", "bokeh"),
    ("pil", "pillow"),
    // Language models
    ("openai", "openai"),
    ("transformers", "transformers"),
    ("datasets", "datasets"),
    ("sentencepiece", "sentencepiece"),
    // Developer tooling
    ("pytest", "pytest"),
    ("black", "black"),
    ("flake8", "flake8"),
    ("mypy", "mypy"),
    ("virtualenv", "virtualenv"),
    ("pipenv", "pipenv"),
    ("pytest_cov", "pytest-cov"),
    ("tox", "tox"),
    ("invoke", "invoke"),
    ("pre_commit", "pre-commit"),
    // Computer vision
    ("cv2", "opencv-python"),
    ("imageio", "imageio"),
    ("mediapipe", "mediapipe"),
    ("dlib", "dlib"),
    // GUI
    ("pyqt5", "pyqt5"),
    ("tkinter", "tkinter"),
    ("kivy", "kivy"),
    // Text processing
    ("spacy", "spacy"),
    ("nltk", "nltk"),
    ("gensim", "gensim"),
    ("textblob", "textblob"),
    // Cloud SDKs
    ("boto3", "boto3"),
    ("google_cloud_storage", "google-cloud-storage"),
    ("azure_storage_blob", "azure-storage-blob"),
    // Async
    ("asyncio", "asyncio"),
    ("trio", "trio"),
    // Files & compression
    ("yaml", "pyyaml"),
    ("h5py", "h5py"),
    ("zlib", "zlib"),
    ("gzip", "gzip"),
    // Security
    ("cryptography", "cryptography"),
    ("paramiko", "paramiko"),
    // Command-line tooling
    ("click", "click"),
    ("argparse", "argparse"),
    ("typer", "typer"),
    // HTTP clients
    ("httpx", "httpx"),
    ("requests_html", "requests-html"),
    // Scheduling
    ("apscheduler", "apscheduler"),
    ("schedule", "schedule"),
    // Serialization
    ("jsonschema", "jsonschema"),
    ("msgpack", "msgpack"),
    ("protobuf", "protobuf"),
    // Audio
    ("pydub", "pydub"),
    ("librosa", "librosa"),
    // Shell automation
    ("shutil", "shutil"),
    ("pathlib", "pathlib"),
    // Configuration
    ("dotenv", "python-dotenv"),
    // Messaging
    ("twilio", "twilio"),
    ("slack_sdk", "slack_sdk"),
    // Misc
    ("pydantic", "pydantic"),
    ("tabulate", "tabulate"),
    ("rich", "rich"),
    ("colorama", "colorama"),
    ("pynput", "pynput"),
];
